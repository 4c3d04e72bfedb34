//! In-process document store backing the hospital modules.
//!
//! Each [`Collection`] is a map of documents keyed by id behind an async
//! read-write lock. Clones share the same underlying map.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use medibase_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::appointments::model::Appointment;
use crate::modules::doctors::model::Doctor;
use crate::modules::patients::model::Patient;

pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

/// A stored document already holds the value being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

#[derive(Debug)]
pub struct Collection<T> {
    docs: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            docs: Arc::clone(&self.docs),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, doc: T) -> T {
        self.docs.write().await.insert(doc.id(), doc.clone());
        doc
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<T> {
        self.docs.read().await.get(&id).cloned()
    }

    pub async fn find<F>(&self, filter: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.docs
            .read()
            .await
            .values()
            .filter(|doc| filter(doc))
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<T> {
        self.find(|_| true).await
    }

    /// Applies `apply` to the stored document and returns the new version.
    pub async fn update<F>(&self, id: Uuid, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut docs = self.docs.write().await;
        let doc = docs.get_mut(&id)?;
        apply(doc);
        Some(doc.clone())
    }

    /// Inserts `doc` unless a stored document matches `conflicts`. The check
    /// and the insert happen under one write guard.
    pub async fn insert_unless<F>(&self, doc: T, conflicts: F) -> Result<T, Conflict>
    where
        F: Fn(&T) -> bool,
    {
        let mut docs = self.docs.write().await;
        if docs.values().any(|existing| conflicts(existing)) {
            return Err(Conflict);
        }
        docs.insert(doc.id(), doc.clone());
        Ok(doc)
    }

    /// Like [`Collection::update`], but refuses when any *other* document
    /// matches `conflicts`. `Ok(None)` means `id` does not exist.
    pub async fn update_unless<C, F>(
        &self,
        id: Uuid,
        conflicts: C,
        apply: F,
    ) -> Result<Option<T>, Conflict>
    where
        C: Fn(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let mut docs = self.docs.write().await;
        if docs
            .iter()
            .any(|(other_id, existing)| *other_id != id && conflicts(existing))
        {
            return Err(Conflict);
        }
        let Some(doc) = docs.get_mut(&id) else {
            return Ok(None);
        };
        apply(doc);
        Ok(Some(doc.clone()))
    }

    pub async fn delete(&self, id: Uuid) -> Option<T> {
        self.docs.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

/// All collections used by the API.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub patients: Collection<Patient>,
    pub doctors: Collection<Doctor>,
    pub appointments: Collection<Appointment>,
}

/// Parses a document id from a path segment.
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(anyhow!("Invalid {} id", entity)))
}
