use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::modules::users::model::UserRecord;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory backend error: {0}")]
    Backend(String),
}

/// Lookup of users by identifier.
///
/// Implementations must be safe to call from many in-flight requests at
/// once. A missing user is `Ok(None)`; `Err` is reserved for the directory
/// itself failing.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, DirectoryError>;
}

/// Directory held in process memory, optionally seeded from a JSON file.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// Loads a JSON array of user records. Records with unknown roles fail
    /// the whole load.
    pub async fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read user seed file {}", path.display()))?;
        let users: Vec<UserRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid user seed file {}", path.display()))?;

        tracing::info!(count = users.len(), path = %path.display(), "Loaded user directory seed");
        Ok(Self::with_users(users))
    }

    pub async fn insert(&self, user: UserRecord) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }
}
