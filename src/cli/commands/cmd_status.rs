use clap::Args;
use colored::*;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::cli::{Context, commands::ExitOnErr};

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Target environment, defaults to `migrations.default_environment`
    #[arg(short, long)]
    pub env: Option<String>,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Revision")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Applied At")]
    applied_at: String,
}

pub async fn execute(args: &StatusArgs, ctx: &Context<'_>) {
    let environment = ctx.environment(&args.env);
    let statuses = ctx
        .services
        .executor
        .status(&environment)
        .await
        .exit_on_err(&format!("Failed to read status of '{}'", environment));

    println!("{}", format!("=== Status of '{}' ===", environment).blue());

    if statuses.is_empty() {
        println!("✅ No revisions found");
        return;
    }

    let pending = statuses.iter().filter(|s| !s.is_applied()).count();
    let rows: Vec<StatusRow> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| StatusRow {
            index: (i + 1).to_string().bright_black().to_string(),
            id: s.revision.id.clone(),
            name: s.revision.name.green().to_string(),
            status: s.to_colored_string(),
            applied_at: s
                .applied_at
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    println!("{} pending", pending.to_string().yellow());
}
