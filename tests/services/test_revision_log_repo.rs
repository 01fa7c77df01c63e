use anyhow::Result;
use tidemark::{
    db::migrations,
    repo::{RevisionLogRepository, RevisionLogStore},
    types::AppliedRevisionRecord,
};

use crate::common::{init_repo, memory_db};

async fn repo() -> Result<RevisionLogRepository> {
    let db = memory_db().await?;
    init_repo(&db).await?;
    Ok(RevisionLogRepository::new(db))
}

#[tokio::test]
async fn test_records_are_sorted_and_partitioned() -> Result<()> {
    let repo = repo().await?;
    for (env, rev) in [
        ("staging", "20260102000000"),
        ("production", "20260101000000"),
        ("staging", "20260101000000"),
    ] {
        repo.insert(AppliedRevisionRecord::now(env, rev)).await?;
    }

    assert_eq!(
        repo.applied_revisions("staging").await?,
        vec!["20260101000000", "20260102000000"]
    );
    assert_eq!(
        repo.applied_revisions("production").await?,
        vec!["20260101000000"]
    );
    assert!(repo.applied_revisions("development").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_record_keeps_its_date() -> Result<()> {
    let repo = repo().await?;
    let record = AppliedRevisionRecord::now("staging", "001");
    repo.insert(record.clone()).await?;

    let stored = repo.records("staging").await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].revision, "001");
    assert_eq!(stored[0].date.timestamp(), record.date.timestamp());
    Ok(())
}

#[tokio::test]
async fn test_delete_removes_every_matching_record() -> Result<()> {
    let repo = repo().await?;
    repo.insert(AppliedRevisionRecord::now("staging", "001")).await?;
    repo.insert(AppliedRevisionRecord::now("staging", "001")).await?;
    repo.insert(AppliedRevisionRecord::now("production", "001")).await?;

    assert_eq!(repo.delete_revision("staging", "001").await?, 2);
    assert_eq!(repo.delete_revision("staging", "001").await?, 0);
    assert_eq!(repo.applied_revisions("production").await?, vec!["001"]);
    Ok(())
}

#[tokio::test]
async fn test_missing_schema_is_a_read_error() -> Result<()> {
    let repo = RevisionLogRepository::new(memory_db().await?);

    let err = repo.records("staging").await.unwrap_err();
    assert!(err.to_string().contains("staging"));
    Ok(())
}

#[tokio::test]
async fn test_log_schema_upgrade_is_idempotent_and_reversible() -> Result<()> {
    let db = memory_db().await?;

    assert!(migrations::up(&db).await? > 0);
    assert_eq!(migrations::up(&db).await?, 0);

    migrations::down(&db, 1).await?;
    let repo = RevisionLogRepository::new(db.clone());
    assert!(repo.records("staging").await.is_err());

    assert!(migrations::up(&db).await? > 0);
    assert!(repo.records("staging").await?.is_empty());
    Ok(())
}
