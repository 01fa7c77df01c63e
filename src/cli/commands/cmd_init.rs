use std::path::Path;

use clap::Args;
use inquire::Confirm;
use tera::Context;
use tracing::{info, warn};

use crate::{
    cli::commands::ExitOnErr,
    config::Settings,
    services::EnvironmentConnections,
    utils::templates::{CONFIG_TEMPLATE, render_template},
};

const CONFIG_FILE: &str = "tidemark.yaml";

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing config file
    #[arg(short, long, default_value_t = false)]
    pub overwrite: bool,
}

pub async fn execute(args: &InitArgs, settings: &Settings) {
    init_config_file(args.overwrite, settings);
    init_migrations_dir(settings);
    init_revision_log(settings).await;
}

fn init_config_file(overwrite: bool, settings: &Settings) {
    let mut ctx = Context::new();
    let environment_url = settings
        .environment(settings.default_environment())
        .map(|config| config.url.clone())
        .unwrap_or_else(|_| format!("sqlite://{}.db?mode=rwc", settings.default_environment()));
    ctx.insert("environment_url", &environment_url);
    ctx.insert("migrations_dir", &settings.migrations.dir);
    ctx.insert("default_environment", settings.default_environment());

    let config_file =
        render_template(CONFIG_TEMPLATE, &ctx).exit_on_err("Failed to render config file");

    if Path::new(CONFIG_FILE).exists() && !overwrite {
        let should_overwrite = Confirm::new(&format!(
            "A {} file already exists. Do you want to overwrite it?",
            CONFIG_FILE
        ))
        .with_default(false)
        .prompt()
        .unwrap_or(false);

        if !should_overwrite {
            println!("Keeping existing {}", CONFIG_FILE);
            return;
        }
    }

    std::fs::write(CONFIG_FILE, config_file).exit_on_err("Failed to create config file");
    println!("✅ Successfully created {}", CONFIG_FILE);
}

fn init_migrations_dir(settings: &Settings) {
    let dir = settings.migrations_dir();
    std::fs::create_dir_all(&dir).exit_on_err("Failed to create migrations directory");
    println!("✅ Migrations directory: {}", dir.display());
}

/// Prepares the log of the default environment when it is already configured.
/// A freshly written config takes effect on the next invocation.
async fn init_revision_log(settings: &Settings) {
    let environment = settings.default_environment();
    let config = match settings.environment(environment) {
        Ok(config) => config.clone(),
        Err(e) => {
            warn!(error = %e, "Skipping revision log preparation");
            println!("Revision log of '{}' will be created on the first run", environment);
            return;
        }
    };

    info!(environment, "Preparing revision log");
    EnvironmentConnections::new([(environment.to_string(), config)].into())
        .log_connection(environment)
        .await
        .exit_on_err("Failed to prepare the revision log");
    println!("✅ Revision log of '{}' ready", environment);
}
