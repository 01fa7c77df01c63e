use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ContextError;

/// Everything a script needs to act on one environment.
#[derive(Clone)]
pub struct MigrationContext {
    environment: String,
    database: Option<String>,
    db: DatabaseConnection,
}

impl MigrationContext {
    pub fn new(environment: &str, database: Option<String>, db: DatabaseConnection) -> Self {
        Self {
            environment: environment.to_string(),
            database,
            db,
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Default database name configured for the environment.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Produces the execution context of an environment.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn context(&self, environment: &str) -> Result<MigrationContext, ContextError>;
}
