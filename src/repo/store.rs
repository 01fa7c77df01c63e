use async_trait::async_trait;

use crate::{errors::StorageError, types::AppliedRevisionRecord};

/// Append/delete log of applied revisions, partitioned by environment.
#[async_trait]
pub trait RevisionLogStore: Send + Sync {
    /// All records of `environment`, ascending by revision.
    async fn records(&self, environment: &str) -> Result<Vec<AppliedRevisionRecord>, StorageError>;

    async fn insert(&self, record: AppliedRevisionRecord) -> Result<(), StorageError>;

    /// Deletes every record of `revision` in `environment` and returns how many went.
    async fn delete_revision(&self, environment: &str, revision: &str)
    -> Result<u64, StorageError>;

    async fn applied_revisions(&self, environment: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .records(environment)
            .await?
            .into_iter()
            .map(|r| r.revision)
            .collect())
    }
}
