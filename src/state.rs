use std::sync::Arc;

use medibase_config::{CorsConfig, DirectoryConfig, JwtConfig};

use crate::db::Database;
use crate::modules::users::directory::{InMemoryDirectory, UserDirectory};

/// Shared application state, cloned into every request.
///
/// `jwt_config` is read-only after startup. `directory` is the only
/// collaborator the access-control chain consults.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub directory: Arc<dyn UserDirectory>,
    pub jwt_config: JwtConfig,
    pub directory_config: DirectoryConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(directory: Arc<dyn UserDirectory>, jwt_config: JwtConfig) -> Self {
        Self {
            db: Database::default(),
            directory,
            jwt_config,
            directory_config: DirectoryConfig::default(),
            cors_config: CorsConfig::parse("*"),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("directory_config", &self.directory_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let directory_config = DirectoryConfig::from_env();

    let directory = match &directory_config.seed_file {
        Some(path) => InMemoryDirectory::from_seed_file(path).await?,
        None => {
            tracing::warn!("USERS_SEED_FILE not set; user directory starts empty");
            InMemoryDirectory::new()
        }
    };

    Ok(AppState {
        db: Database::default(),
        directory: Arc::new(directory),
        jwt_config: JwtConfig::from_env(),
        directory_config,
        cors_config: CorsConfig::from_env(),
    })
}
