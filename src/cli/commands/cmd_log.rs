use clap::{Args, Subcommand};
use sea_orm::DatabaseConnection;

use crate::{
    cli::commands::ExitOnErr, config::Settings, db::migrations,
    services::EnvironmentConnections,
};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Environment whose revision log to manage, defaults to the configured one
    #[arg(short, long)]
    pub env: Option<String>,

    #[command(subcommand)]
    pub action: LogSchemaCommands,
}

#[derive(Subcommand, Debug)]
pub enum LogSchemaCommands {
    /// Create or upgrade the revision log table
    Up,

    /// Revert revision log schema changes, dropping the table at the first one
    Down {
        #[arg(long, default_value = "1")]
        steps: u32,
    },
}

pub async fn execute(args: &LogArgs, settings: &Settings) {
    let environment = args
        .env
        .as_deref()
        .unwrap_or_else(|| settings.default_environment());
    let db = log_database(settings, environment).await;

    match args.action {
        LogSchemaCommands::Up => {
            let applied = migrations::up(&db)
                .await
                .exit_on_err("Failed to upgrade the revision log schema");
            println!("✅ Revision log of '{}' is current ({} change(s) applied)", environment, applied);
        }
        LogSchemaCommands::Down { steps } => {
            migrations::down(&db, steps)
                .await
                .exit_on_err("Failed to revert the revision log schema");
            println!("✅ Reverted {} revision log change(s) of '{}'", steps, environment);
        }
    }
}

async fn log_database(settings: &Settings, environment: &str) -> DatabaseConnection {
    let config = settings
        .environment(environment)
        .exit_on_err("Cannot manage the revision log")
        .clone();

    EnvironmentConnections::new([(environment.to_string(), config)].into())
        .log_database(environment)
        .await
        .exit_on_err("Failed to connect to the revision log database")
}
