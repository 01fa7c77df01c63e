use chrono::Utc;
use clap::Args;
use tera::Context;

use crate::{
    cli::commands::ExitOnErr,
    config::Settings,
    utils::{
        parsers::parse_revision_name,
        revision_id,
        templates::{REVISION_TEMPLATE, render_template},
    },
};

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Script name of the revision, without '_'
    #[arg(value_parser = parse_revision_name)]
    pub name: String,
}

pub fn execute(args: &NewArgs, settings: &Settings) {
    let dir = settings.migrations_dir();
    if !dir.is_dir() {
        eprintln!(
            "❌ Migrations directory '{}' does not exist. Run `tidemark init` first.",
            dir.display()
        );
        std::process::exit(1);
    }

    let now = Utc::now();
    let id = revision_id(now);
    let path = dir.join(format!("{}_{}.sql", id, args.name));
    if path.exists() {
        eprintln!("❌ Revision file '{}' already exists", path.display());
        std::process::exit(1);
    }

    let mut ctx = Context::new();
    ctx.insert("id", &id);
    ctx.insert("name", &args.name);
    ctx.insert("created_at", &now.to_rfc3339());

    let contents =
        render_template(REVISION_TEMPLATE, &ctx).exit_on_err("Failed to render revision file");
    std::fs::write(&path, contents).exit_on_err("Failed to write revision file");

    println!("✅ Created {}", path.display());
}
