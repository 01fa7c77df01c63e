use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use sea_orm::DbErr;
use tidemark::{errors::StorageError, repo::RevisionLogStore, types::AppliedRevisionRecord};

/// Revision log kept in memory, with read counting and write failure injection.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AppliedRevisionRecord>>,
    reads: AtomicUsize,
    fail_insert_of: Mutex<Option<String>>,
    fail_delete_of: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_applied(environment: &str, revisions: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut records = store.records.lock().unwrap();
            for revision in revisions {
                records.push(AppliedRevisionRecord::now(environment, revision));
            }
        }
        store
    }

    pub fn applied(&self, environment: &str) -> Vec<String> {
        let mut revisions: Vec<String> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.environment == environment)
            .map(|r| r.revision.clone())
            .collect();
        revisions.sort();
        revisions
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn fail_insert_of(&self, revision: &str) {
        *self.fail_insert_of.lock().unwrap() = Some(revision.to_string());
    }

    pub fn fail_delete_of(&self, revision: &str) {
        *self.fail_delete_of.lock().unwrap() = Some(revision.to_string());
    }
}

#[async_trait]
impl RevisionLogStore for MemoryStore {
    async fn records(&self, environment: &str) -> Result<Vec<AppliedRevisionRecord>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut records: Vec<AppliedRevisionRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.environment == environment)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.revision.cmp(&b.revision));
        Ok(records)
    }

    async fn insert(&self, record: AppliedRevisionRecord) -> Result<(), StorageError> {
        if self.fail_insert_of.lock().unwrap().as_deref() == Some(record.revision.as_str()) {
            return Err(StorageError::Insert {
                environment: record.environment,
                revision: record.revision,
                source: DbErr::Custom("disk full".to_string()),
            });
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn delete_revision(
        &self,
        environment: &str,
        revision: &str,
    ) -> Result<u64, StorageError> {
        if self.fail_delete_of.lock().unwrap().as_deref() == Some(revision) {
            return Err(StorageError::Delete {
                environment: environment.to_string(),
                revision: revision.to_string(),
                source: DbErr::Custom("database is locked".to_string()),
            });
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.environment == environment && r.revision == revision));
        Ok((before - records.len()) as u64)
    }
}
