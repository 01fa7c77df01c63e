use std::path::PathBuf;

use sea_orm::DbErr;
use thiserror::Error;

use crate::types::Direction;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Migrations directory '{}' could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Revision file '{filename}' does not match '<id>_<name>.<ext>'")]
    MalformedFilename { filename: String },

    #[error("Revision id '{id}' is used by both '{first}' and '{second}'")]
    DuplicateRevision {
        id: String,
        first: String,
        second: String,
    },
}

#[derive(Error, Debug)]
pub enum ScriptResolutionError {
    #[error("No script registered for '{name}' (revision {id}, file '{filename}')")]
    UnknownScript {
        id: String,
        name: String,
        filename: String,
    },

    #[error("Failed to read revision file '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Revision file '{filename}' is invalid: {reason}")]
    InvalidStatementFile { filename: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Revision log of environment '{environment}' is unavailable: {source}")]
    Unavailable {
        environment: String,
        #[source]
        source: ContextError,
    },

    #[error("Failed to read applied revisions for environment '{environment}': {source}")]
    Read {
        environment: String,
        #[source]
        source: DbErr,
    },

    #[error("Failed to log revision {revision} as applied in '{environment}': {source}")]
    Insert {
        environment: String,
        revision: String,
        #[source]
        source: DbErr,
    },

    #[error("Failed to remove revision {revision} from the log of '{environment}': {source}")]
    Delete {
        environment: String,
        revision: String,
        #[source]
        source: DbErr,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Limit must be a positive integer, got '{0}'")]
    InvalidLimit(String),

    #[error("Revision name '{0}' must be non-empty, alphanumeric and must not contain '_'")]
    InvalidRevisionName(String),
}

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Environment '{0}' is not configured")]
    UnknownEnvironment(String),

    #[error("Failed to connect to environment '{environment}': {source}")]
    Connection {
        environment: String,
        #[source]
        source: DbErr,
    },

    #[error("Failed to prepare the revision log schema of '{environment}': {source}")]
    LogSchema {
        environment: String,
        #[source]
        source: DbErr,
    },
}

/// Failure of a migrate or rollback run.
#[derive(Error, Debug)]
pub enum MigratorError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Resolution(#[from] ScriptResolutionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Revision {revision} ({name}) failed to run {direction} in '{environment}': {source:#}")]
    ScriptFailed {
        revision: String,
        name: String,
        environment: String,
        direction: Direction,
        #[source]
        source: anyhow::Error,
    },
}
