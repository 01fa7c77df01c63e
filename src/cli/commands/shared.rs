use chrono::{DateTime, Utc};
use colored::Colorize;
use tracing::debug;

use crate::{
    cli::Context,
    hooks::HookRunner,
    types::{Direction, RunReport},
    utils::{RunProgress, format_duration},
};

/// Attaches hook and spinner listeners for a run.
pub fn prepare_run(ctx: &Context<'_>, disable_hooks: bool, message: String) -> RunProgress {
    let dispatcher = ctx.services.executor.dispatcher();

    let hooks = HookRunner::new(disable_hooks, ctx.settings.hooks.clone()).attach(dispatcher);
    debug!(hooks, "Attached hook listeners");

    let progress = RunProgress::start(message);
    progress.attach(dispatcher);
    progress
}

pub fn print_report(report: &RunReport, started_at: DateTime<Utc>) {
    let elapsed = format_duration(started_at, Utc::now());
    let env = report.environment.bold();

    match (report.direction, report.is_empty()) {
        (Direction::Up, true) => println!("✅ '{}' is up to date", env),
        (Direction::Down, true) => println!("✅ Nothing to roll back on '{}'", env),
        (Direction::Up, false) => println!(
            "✅ Applied {} revision(s) on '{}' in {}",
            report.revisions.len(),
            env,
            elapsed
        ),
        (Direction::Down, false) => println!(
            "✅ Reverted {} revision(s) on '{}' in {}",
            report.revisions.len(),
            env,
            elapsed
        ),
    }
}
