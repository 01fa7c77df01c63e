use std::{process::Command, sync::Arc};

use anyhow::{Context as _, Result, bail};
use tera::{Context, Tera};
use tracing::{debug, info, warn};

use crate::{
    config::HooksConfig,
    events::{EventDispatcher, LifecycleEvent},
    types::LifecycleEventKind,
};
use strum::IntoEnumIterator;

/// Runs the configured shell commands when lifecycle events fire.
///
/// Commands are rendered with `environment`, `event` and, for revision events,
/// `revision.id`, `revision.name` and `revision.filename`. A failing command is
/// logged and does not affect the run.
pub struct HookRunner {
    disable_hooks: bool,
    hooks: HooksConfig,
}

impl HookRunner {
    pub fn new(disable_hooks: bool, hooks: HooksConfig) -> Self {
        Self {
            disable_hooks,
            hooks,
        }
    }

    /// Registers one listener per event that has commands. Returns how many
    /// listeners were attached.
    pub fn attach(&self, dispatcher: &dyn EventDispatcher) -> usize {
        if self.disable_hooks {
            return 0;
        }

        let mut attached = 0;
        for kind in LifecycleEventKind::iter() {
            let commands = self.hooks.commands(kind);
            if commands.is_empty() {
                continue;
            }
            let commands = Arc::new(commands);
            dispatcher.add_listener(
                kind,
                Arc::new(move |event: &mut LifecycleEvent| run_hooks(event, &commands)),
                0,
            );
            attached += 1;
        }
        attached
    }
}

fn run_hooks(event: &LifecycleEvent, commands: &[String]) {
    let ctx = template_context(event);
    let count = commands.len();

    for (i, template) in commands.iter().enumerate() {
        info!(
            event = %event.kind(),
            "Executing hook {} of {}",
            i + 1,
            count
        );
        if let Err(e) = render(template, &ctx).and_then(|command| execute(&command)) {
            warn!(event = %event.kind(), error = %format!("{e:#}"), "Hook failed");
        }
    }
}

fn template_context(event: &LifecycleEvent) -> Context {
    let mut ctx = Context::new();
    ctx.insert("environment", event.environment());
    ctx.insert("event", &event.kind().to_string());
    if let Some(revision) = event.revision() {
        ctx.insert("revision", revision);
    }
    ctx
}

fn render(template: &str, ctx: &Context) -> Result<String> {
    Tera::default()
        .render_str(template, ctx)
        .context(format!("Failed to render hook '{}'", template))
}

fn execute(command: &str) -> Result<()> {
    let output = if cfg!(windows) {
        Command::new("cmd").args(["/C", command]).output()
    } else {
        Command::new("sh").args(["-c", command]).output()
    }
    .context(format!("Failed to spawn hook '{}'", command))?;

    debug!(
        stdout = %String::from_utf8_lossy(&output.stdout).trim(),
        "Hook finished"
    );

    if !output.status.success() {
        bail!(
            "hook '{}' exited with {}: {}",
            command,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
