use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{debug, warn};

use crate::{
    errors::StorageError,
    repo::RevisionLogStore,
    types::AppliedRevisionRecord,
};

/// Memoized applied-revision lists, keyed by environment.
#[derive(Default)]
pub struct AppliedRevisionCache {
    entries: Mutex<HashMap<String, Vec<String>>>,
}

impl AppliedRevisionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, environment: &str) -> Option<Vec<String>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(environment)
            .cloned()
    }

    pub fn set(&self, environment: &str, revisions: Vec<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(environment.to_string(), revisions);
    }

    pub fn invalidate(&self, environment: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(environment);
    }
}

/// Tracks which revisions have been applied to each environment.
pub struct AppliedRevisionLedger {
    store: Arc<dyn RevisionLogStore>,
    cache: AppliedRevisionCache,
}

impl AppliedRevisionLedger {
    pub fn new(store: Arc<dyn RevisionLogStore>) -> Self {
        Self {
            store,
            cache: AppliedRevisionCache::new(),
        }
    }

    /// Applied revision ids of `environment`, ascending.
    ///
    /// Non-empty results are memoized until [`invalidate`](Self::invalidate).
    pub async fn get_applied(&self, environment: &str) -> Result<Vec<String>, StorageError> {
        if let Some(cached) = self.cache.get(environment) {
            return Ok(cached);
        }

        let revisions = self.store.applied_revisions(environment).await?;
        debug!(
            environment,
            count = revisions.len(),
            "Loaded applied revisions"
        );

        if !revisions.is_empty() {
            self.cache.set(environment, revisions.clone());
        }
        Ok(revisions)
    }

    pub async fn is_applied(&self, revision: &str, environment: &str) -> Result<bool, StorageError> {
        Ok(self
            .get_applied(environment)
            .await?
            .iter()
            .any(|r| r == revision))
    }

    /// The watermark: highest applied id, if any.
    pub async fn latest_applied(&self, environment: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get_applied(environment).await?.pop())
    }

    pub async fn record_up(&self, revision: &str, environment: &str) -> Result<(), StorageError> {
        self.store
            .insert(AppliedRevisionRecord::now(environment, revision))
            .await
    }

    pub async fn record_down(&self, revision: &str, environment: &str) -> Result<u64, StorageError> {
        let deleted = self.store.delete_revision(environment, revision).await?;
        if deleted == 0 {
            warn!(environment, revision, "No log entry to remove");
        }
        Ok(deleted)
    }

    pub fn invalidate(&self, environment: &str) {
        debug!(environment, "Dropping cached applied revisions");
        self.cache.invalidate(environment);
    }

    /// Full records with their dates; always read from the store.
    pub async fn records(
        &self,
        environment: &str,
    ) -> Result<Vec<AppliedRevisionRecord>, StorageError> {
        self.store.records(environment).await
    }
}
