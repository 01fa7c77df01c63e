use chrono::Utc;
use clap::Args;

use crate::cli::{
    Context,
    commands::{
        ExitOnErr,
        shared::{prepare_run, print_report},
    },
};

#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Target environment, defaults to `migrations.default_environment`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Stop after this revision (id or name), inclusive
    #[arg(long)]
    pub to: Option<String>,

    /// Disable hooks
    #[arg(long, default_value_t = false)]
    pub no_hooks: bool,
}

pub async fn execute(args: &MigrateArgs, ctx: &Context<'_>) {
    let environment = ctx.environment(&args.env);
    let started_at = Utc::now();

    let progress = prepare_run(ctx, args.no_hooks, format!("Migrating '{}'...", environment));
    let result = ctx
        .services
        .executor
        .migrate(args.to.as_deref(), &environment)
        .await;
    progress.finish();

    let report = result.exit_on_err(&format!("Migration of '{}' failed", environment));
    print_report(&report, started_at);
}
