use anyhow::Result;
use async_trait::async_trait;

/// A unit of work supplied by migration authors.
///
/// Instances are built by a factory from the target environment's
/// [`MigrationContext`](crate::scripts::MigrationContext). The executor calls
/// `bind_environment` once before `up` or `down`. Returning an error aborts the
/// run; the revision is then not logged.
#[async_trait]
pub trait RevisionScript: Send {
    fn bind_environment(&mut self, environment: &str);

    async fn up(&mut self) -> Result<()>;

    async fn down(&mut self) -> Result<()>;
}
