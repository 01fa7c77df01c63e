use serde::{Deserialize, Serialize};

/// Connection settings of one target environment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub url: String,

    /// Default database name handed to scripts.
    #[serde(default)]
    pub database: Option<String>,

    /// Where the revision log of this environment lives. Defaults to `url`, so
    /// the log travels with the environment. Pointing several environments at
    /// one shared database keeps their logs side by side.
    #[serde(default)]
    pub log_url: Option<String>,
}

impl EnvironmentConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            database: None,
            log_url: None,
        }
    }

    pub fn log_url(&self) -> &str {
        self.log_url.as_deref().unwrap_or(&self.url)
    }
}
