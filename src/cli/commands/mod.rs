pub mod cmd_init;
pub mod cmd_list;
pub mod cmd_log;
pub mod cmd_migrate;
pub mod cmd_new;
pub mod cmd_rollback;
pub mod cmd_status;
pub mod cmd_version;
mod shared;

use clap::Subcommand;

use crate::cli::commands::{
    cmd_init::InitArgs, cmd_list::ListArgs, cmd_log::LogArgs, cmd_migrate::MigrateArgs,
    cmd_new::NewArgs, cmd_rollback::RollbackArgs, cmd_status::StatusArgs,
    cmd_version::VersionCommand,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending revisions
    Migrate(MigrateArgs),

    /// Revert applied revisions
    Rollback(RollbackArgs),

    /// Show every revision and whether it is applied
    Status(StatusArgs),

    /// List available revisions
    List(ListArgs),

    /// Create a new revision file
    New(NewArgs),

    /// Create the migrations directory, a config file and the revision log
    Init(InitArgs),

    /// Manage the revision log schema of an environment
    Log(LogArgs),

    /// Print effective configuration, or one dotted key of it
    Config {
        /// e.g. `environments.production.url`
        key: Option<String>,
    },

    /// Print version
    Version(VersionCommand),
}

pub trait ExitOnErr<T> {
    fn exit_on_err(self, msg: &str) -> T;
}

impl<T, E: std::fmt::Display> ExitOnErr<T> for Result<T, E> {
    fn exit_on_err(self, msg: &str) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("❌ {}: {}", msg, e);
                std::process::exit(1);
            }
        }
    }
}
