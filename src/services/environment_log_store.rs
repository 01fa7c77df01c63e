use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::StorageError,
    repo::{RevisionLogRepository, RevisionLogStore},
    services::EnvironmentConnections,
    types::AppliedRevisionRecord,
};

/// Keeps each environment's log in the database named by its `log_url`,
/// which is the environment's own database unless configured otherwise.
pub struct EnvironmentLogStore {
    connections: Arc<EnvironmentConnections>,
}

impl EnvironmentLogStore {
    pub fn new(connections: Arc<EnvironmentConnections>) -> Self {
        Self { connections }
    }

    async fn repo(&self, environment: &str) -> Result<RevisionLogRepository, StorageError> {
        let db = self
            .connections
            .log_connection(environment)
            .await
            .map_err(|source| StorageError::Unavailable {
                environment: environment.to_string(),
                source,
            })?;
        Ok(RevisionLogRepository::new(db))
    }
}

#[async_trait]
impl RevisionLogStore for EnvironmentLogStore {
    async fn records(&self, environment: &str) -> Result<Vec<AppliedRevisionRecord>, StorageError> {
        self.repo(environment).await?.records(environment).await
    }

    async fn insert(&self, record: AppliedRevisionRecord) -> Result<(), StorageError> {
        self.repo(&record.environment).await?.insert(record).await
    }

    async fn delete_revision(
        &self,
        environment: &str,
        revision: &str,
    ) -> Result<u64, StorageError> {
        self.repo(environment)
            .await?
            .delete_revision(environment, revision)
            .await
    }
}
