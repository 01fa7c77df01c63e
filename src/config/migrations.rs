use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MigrationsConfig {
    #[serde(default = "default_dir")]
    pub dir: String,

    #[serde(default = "default_environment")]
    pub default_environment: String,

    /// Run unregistered `.sql` revision files as statement scripts.
    #[serde(default = "default_statement_files")]
    pub statement_files: bool,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            default_environment: default_environment(),
            statement_files: default_statement_files(),
        }
    }
}

fn default_dir() -> String {
    "migrations".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_statement_files() -> bool {
    true
}
