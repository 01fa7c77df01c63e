use std::sync::Arc;

use anyhow::Result;
use tidemark::services::AppliedRevisionLedger;

use crate::common::MemoryStore;

#[tokio::test]
async fn test_applied_set_is_memoized_until_invalidated() -> Result<()> {
    let store = Arc::new(MemoryStore::with_applied("test", &["002", "001"]));
    let ledger = AppliedRevisionLedger::new(store.clone());

    assert_eq!(ledger.get_applied("test").await?, vec!["001", "002"]);
    assert!(ledger.is_applied("002", "test").await?);
    assert_eq!(ledger.latest_applied("test").await?.as_deref(), Some("002"));
    assert_eq!(store.reads(), 1);

    ledger.record_up("003", "test").await?;
    // still served from the cache
    assert_eq!(ledger.latest_applied("test").await?.as_deref(), Some("002"));

    ledger.invalidate("test");
    assert_eq!(ledger.latest_applied("test").await?.as_deref(), Some("003"));
    assert_eq!(store.reads(), 2);
    Ok(())
}

#[tokio::test]
async fn test_empty_applied_set_is_not_memoized() -> Result<()> {
    let store = Arc::new(MemoryStore::default());
    let ledger = AppliedRevisionLedger::new(store.clone());

    assert!(ledger.get_applied("test").await?.is_empty());
    assert!(ledger.latest_applied("test").await?.is_none());
    assert_eq!(store.reads(), 2);

    ledger.record_up("001", "test").await?;
    assert!(ledger.is_applied("001", "test").await?);
    Ok(())
}

#[tokio::test]
async fn test_record_down_counts_deleted_entries() -> Result<()> {
    let store = Arc::new(MemoryStore::with_applied("test", &["001", "001", "002"]));
    let ledger = AppliedRevisionLedger::new(store.clone());

    assert_eq!(ledger.record_down("001", "test").await?, 2);
    assert_eq!(ledger.record_down("001", "test").await?, 0);
    assert_eq!(ledger.record_down("002", "other").await?, 0);
    assert_eq!(store.applied("test"), vec!["002"]);
    Ok(())
}

#[tokio::test]
async fn test_records_are_read_from_the_store() -> Result<()> {
    let store = Arc::new(MemoryStore::with_applied("test", &["002", "001"]));
    let ledger = AppliedRevisionLedger::new(store.clone());

    let records = ledger.records("test").await?;
    let ids: Vec<&str> = records.iter().map(|r| r.revision.as_str()).collect();
    assert_eq!(ids, vec!["001", "002"]);
    assert!(records.iter().all(|r| r.environment == "test"));

    ledger.records("test").await?;
    assert_eq!(store.reads(), 2);
    Ok(())
}
