use chrono::Utc;
use clap::Args;
use inquire::Confirm;

use crate::cli::{
    Context,
    commands::{
        ExitOnErr,
        shared::{prepare_run, print_report},
    },
};

#[derive(Args, Debug, Clone)]
pub struct RollbackArgs {
    /// Target environment, defaults to `migrations.default_environment`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Revert every revision above this one (id or name); the target stays applied.
    /// Without it, only the latest revision is reverted.
    #[arg(long)]
    pub to: Option<String>,

    /// Skip confirmation prompt
    #[arg(short, long, default_value_t = false)]
    pub yes: bool,

    /// Disable hooks
    #[arg(long, default_value_t = false)]
    pub no_hooks: bool,
}

pub async fn execute(args: &RollbackArgs, ctx: &Context<'_>) {
    let environment = ctx.environment(&args.env);

    if let Some(target) = &args.to {
        if !args.yes {
            let confirmed = Confirm::new(&format!(
                "Revert every revision above '{}' on '{}'?",
                target, environment
            ))
            .with_default(false)
            .prompt()
            .unwrap_or(false);

            if !confirmed {
                println!("Exiting...");
                return;
            }
        }
    }

    let started_at = Utc::now();
    let progress = prepare_run(
        ctx,
        args.no_hooks,
        format!("Rolling back '{}'...", environment),
    );
    let result = ctx
        .services
        .executor
        .rollback(args.to.as_deref(), &environment)
        .await;
    progress.finish();

    let report = result.exit_on_err(&format!("Rollback of '{}' failed", environment));
    print_report(&report, started_at);
}
