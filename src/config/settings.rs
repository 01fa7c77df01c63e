use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    config::{EnvironmentConfig, HooksConfig, LogConfig, MigrationsConfig},
    errors::ContextError,
    types::LifecycleEventKind,
};

const DEFAULT_CONFIG_NAME: &str = "tidemark";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub logs: LogConfig,

    #[serde(default)]
    pub migrations: MigrationsConfig,

    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,

    #[serde(default)]
    pub hooks: HooksConfig,

    /// Directory of the config file the settings were read from.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn get_env_file_name() -> String {
    if let Ok(env_file) = std::env::var("TIDEMARK_ENV_FILE") {
        return env_file;
    }
    if let Ok(env) = std::env::var("TIDEMARK_ENV") {
        match env.as_str().to_lowercase().as_str() {
            "dev" => return ".env.dev".to_string(),
            "test" => return ".env.test".to_string(),
            "prod" => return ".env".to_string(),
            _ => return ".env".to_string(),
        }
    }
    ".env".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Reads settings from `config_file` (or `TIDEMARK_CONFIG`, or an optional
    /// `tidemark.{yaml,toml,json}` in the working directory), then from the
    /// environment. Environment variables win.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file using `TIDEMARK_ENV` env var
        dotenvy::from_filename(get_env_file_name()).ok();

        let config_file = config_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("TIDEMARK_CONFIG").ok().map(PathBuf::from));

        let builder = match &config_file {
            Some(path) => Config::builder().add_source(File::from(path.as_path()).required(true)),
            None => Config::builder().add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        // Hook commands may be given as one newline separated variable
        let environment = LifecycleEventKind::iter().fold(
            Environment::with_prefix("TIDEMARK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator("\n"),
            |env, kind| env.with_list_parse_key(&format!("hooks.{}", kind)),
        );

        let mut settings: Settings = builder.add_source(environment).build()?.try_deserialize()?;
        settings.base_dir = config_file
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf);

        Ok(settings)
    }

    /// Migrations directory. Relative paths are taken from the config file's
    /// directory when settings came from an explicit file.
    pub fn migrations_dir(&self) -> PathBuf {
        let dir = PathBuf::from(&self.migrations.dir);
        match &self.base_dir {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir,
        }
    }

    pub fn default_environment(&self) -> &str {
        &self.migrations.default_environment
    }

    pub fn environment(&self, name: &str) -> Result<&EnvironmentConfig, ContextError> {
        self.environments
            .get(name)
            .ok_or_else(|| ContextError::UnknownEnvironment(name.to_string()))
    }

    /// Dotted-path lookup, e.g. `environments.production.url`.
    pub fn get(&self, path: &str) -> Option<serde_json::Value> {
        let root = serde_json::to_value(self).ok()?;
        path.split('.')
            .try_fold(root, |value, field| value.get(field).cloned())
    }

    pub fn print_config(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to serialize settings: {}", err),
        }
    }
}
