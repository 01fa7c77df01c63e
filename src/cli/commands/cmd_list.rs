use clap::Args;
use colored::*;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::{
    catalog::RevisionCatalog, cli::commands::ExitOnErr, config::Settings,
    utils::parsers::parse_limit,
};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Show only the latest N revisions
    #[arg(short, long, value_parser = parse_limit)]
    pub limit: Option<usize>,
}

#[derive(Tabled)]
struct RevisionRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Revision")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "File")]
    filename: String,
}

pub fn execute(args: &ListArgs, settings: &Settings) {
    let catalog = RevisionCatalog::new(settings.migrations_dir());
    let revisions = catalog
        .list_revisions(args.limit)
        .exit_on_err("Failed to list revisions");

    println!("{}", "=== Revisions ===".blue());

    if revisions.is_empty() {
        println!("✅ No revisions found in '{}'", catalog.dir().display());
        return;
    }

    let rows: Vec<RevisionRow> = revisions
        .into_iter()
        .enumerate()
        .map(|(i, r)| RevisionRow {
            index: (i + 1).to_string().bright_black().to_string(),
            id: r.id,
            name: r.name.green().to_string(),
            filename: r.filename.bright_cyan().to_string(),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}
