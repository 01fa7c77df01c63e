mod commands;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use crate::cli::commands::{
    Commands, cmd_init, cmd_list, cmd_log, cmd_migrate, cmd_new, cmd_rollback,
    cmd_status, cmd_version,
};
use crate::config::Settings;
use crate::scripts::ScriptRegistry;
use crate::services::AppServices;

pub struct Context<'a> {
    pub settings: &'a Settings,
    pub services: AppServices,
}

impl<'a> Context<'a> {
    /// Builds the services. Revision logs are prepared when an environment is first used.
    pub fn new(settings: &'a Settings, registry: ScriptRegistry) -> Self {
        Self {
            settings,
            services: AppServices::new(settings, registry),
        }
    }

    /// The `--env` argument or the configured default environment. Exits on
    /// a name that is not configured.
    pub fn environment(&self, env: &Option<String>) -> String {
        let name = env
            .clone()
            .unwrap_or_else(|| self.services.executor.default_environment().to_string());

        let configured = self.services.connections.names();
        if !configured.contains(&name.as_str()) {
            eprintln!(
                "❌ Unknown environment '{}'. Configured: {}",
                name,
                if configured.is_empty() { "none".to_string() } else { configured.join(", ") }
            );
            std::process::exit(1);
        }
        name
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tidemark",
    about = "Tidemark CLI application",
    long_about = format!(
r#"{} - {}"#,
"TIDEMARK".cyan().bold(),
"Ordered, reversible database migrations for every environment."
))]
pub struct Cli {
    /// Config file, overrides `TIDEMARK_CONFIG`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Runs the command. `registry` holds the scripts revisions resolve to.
    pub async fn execute(&self, settings: &Settings, registry: ScriptRegistry) {
        match &self.command {
            Commands::Migrate(args) => {
                cmd_migrate::execute(args, &Context::new(settings, registry)).await
            }
            Commands::Rollback(args) => {
                cmd_rollback::execute(args, &Context::new(settings, registry)).await
            }
            Commands::Status(args) => {
                cmd_status::execute(args, &Context::new(settings, registry)).await
            }
            Commands::List(args) => cmd_list::execute(args, settings),
            Commands::New(args) => cmd_new::execute(args, settings),
            Commands::Init(args) => cmd_init::execute(args, settings).await,
            Commands::Log(args) => cmd_log::execute(args, settings).await,
            Commands::Config { key: None } => settings.print_config(),
            Commands::Config { key: Some(key) } => match settings.get(key) {
                Some(value) => println!("{}", value),
                None => {
                    eprintln!("❌ No configuration value at '{}'", key);
                    std::process::exit(1);
                }
            },
            Commands::Version(action) => cmd_version::execute(action),
        }
    }
}
