use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    config::EnvironmentConfig,
    db::migrations,
    errors::ContextError,
    scripts::{ContextProvider, MigrationContext},
};

/// Connects to configured environments on first use and keeps the connections.
///
/// Connections are shared by url, so an environment whose log lives in its own
/// database uses a single pool for scripts and log alike.
pub struct EnvironmentConnections {
    environments: HashMap<String, EnvironmentConfig>,
    pools: Mutex<HashMap<String, DatabaseConnection>>,
    prepared_logs: Mutex<HashSet<String>>,
}

impl EnvironmentConnections {
    pub fn new(environments: HashMap<String, EnvironmentConfig>) -> Self {
        Self {
            environments,
            pools: Mutex::new(HashMap::new()),
            prepared_logs: Mutex::new(HashSet::new()),
        }
    }

    /// Configured environment names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.environments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn config(&self, environment: &str) -> Result<&EnvironmentConfig, ContextError> {
        self.environments
            .get(environment)
            .ok_or_else(|| ContextError::UnknownEnvironment(environment.to_string()))
    }

    async fn connect(&self, environment: &str, url: &str) -> Result<DatabaseConnection, ContextError> {
        let mut pools = self.pools.lock().await;
        if let Some(db) = pools.get(url) {
            return Ok(db.clone());
        }

        debug!(environment, "Connecting");
        let db = Database::connect(url)
            .await
            .map_err(|source| ContextError::Connection {
                environment: environment.to_string(),
                source,
            })?;
        pools.insert(url.to_string(), db.clone());
        Ok(db)
    }

    /// Connection to the database holding the log of `environment`, as is.
    pub async fn log_database(&self, environment: &str) -> Result<DatabaseConnection, ContextError> {
        let url = self.config(environment)?.log_url().to_string();
        self.connect(environment, &url).await
    }

    /// Like [`log_database`](Self::log_database), with the log schema applied
    /// once per database.
    pub async fn log_connection(
        &self,
        environment: &str,
    ) -> Result<DatabaseConnection, ContextError> {
        let url = self.config(environment)?.log_url().to_string();
        let db = self.connect(environment, &url).await?;

        let mut prepared = self.prepared_logs.lock().await;
        if !prepared.contains(&url) {
            migrations::up(&db)
                .await
                .map_err(|source| ContextError::LogSchema {
                    environment: environment.to_string(),
                    source,
                })?;
            prepared.insert(url);
        }
        Ok(db)
    }
}

#[async_trait]
impl ContextProvider for EnvironmentConnections {
    async fn context(&self, environment: &str) -> Result<MigrationContext, ContextError> {
        let config = self.config(environment)?;
        let db = self.connect(environment, &config.url).await?;

        Ok(MigrationContext::new(
            environment,
            config.database.clone(),
            db,
        ))
    }
}
