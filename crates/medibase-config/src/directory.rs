use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the user directory consulted on every authenticated request.
#[derive(Clone, Debug)]
pub struct DirectoryConfig {
    /// Upper bound on a single identity lookup. A slow directory surfaces as
    /// a rejected request instead of a hung one.
    pub lookup_timeout: Duration,
    /// Optional JSON array of user records loaded at startup.
    pub seed_file: Option<PathBuf>,
}

impl DirectoryConfig {
    pub fn from_env() -> Self {
        Self {
            lookup_timeout: Duration::from_millis(
                env::var("DIRECTORY_LOOKUP_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            seed_file: env::var("USERS_SEED_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(2),
            seed_file: None,
        }
    }
}
