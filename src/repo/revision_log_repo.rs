use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entities::{RevisionLogActiveModel, RevisionLogColumn, RevisionLogEntity},
    errors::StorageError,
    repo::RevisionLogStore,
    types::AppliedRevisionRecord,
};

pub struct RevisionLogRepository {
    db: DatabaseConnection,
}

impl RevisionLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RevisionLogStore for RevisionLogRepository {
    async fn records(&self, environment: &str) -> Result<Vec<AppliedRevisionRecord>, StorageError> {
        let models = RevisionLogEntity::find()
            .filter(RevisionLogColumn::Environment.eq(environment))
            .order_by_asc(RevisionLogColumn::Revision)
            .order_by_asc(RevisionLogColumn::Id)
            .all(&self.db)
            .await
            .map_err(|source| StorageError::Read {
                environment: environment.to_string(),
                source,
            })?;

        Ok(models.into_iter().map(|m| m.into_record()).collect())
    }

    async fn insert(&self, record: AppliedRevisionRecord) -> Result<(), StorageError> {
        RevisionLogEntity::insert(RevisionLogActiveModel::from_record(&record))
            .exec(&self.db)
            .await
            .map_err(|source| StorageError::Insert {
                environment: record.environment.clone(),
                revision: record.revision.clone(),
                source,
            })?;
        Ok(())
    }

    async fn delete_revision(
        &self,
        environment: &str,
        revision: &str,
    ) -> Result<u64, StorageError> {
        let res = RevisionLogEntity::delete_many()
            .filter(RevisionLogColumn::Environment.eq(environment))
            .filter(RevisionLogColumn::Revision.eq(revision))
            .exec(&self.db)
            .await
            .map_err(|source| StorageError::Delete {
                environment: environment.to_string(),
                revision: revision.to_string(),
                source,
            })?;
        Ok(res.rows_affected)
    }
}
