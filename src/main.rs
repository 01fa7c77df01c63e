use tidemark::{cli::Cli, config::Settings, scripts::ScriptRegistry, utils};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    utils::logger::init_logging(&settings.logs);

    let registry = if settings.migrations.statement_files {
        ScriptRegistry::new()
    } else {
        ScriptRegistry::new().without_statement_files()
    };
    cli.execute(&settings, registry).await;
}
