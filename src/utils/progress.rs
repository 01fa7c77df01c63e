use std::{sync::Arc, time::Duration};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    events::{EventDispatcher, LifecycleEvent},
    types::LifecycleEventKind,
};

/// Spinner that follows the revision events of a run.
#[derive(Clone)]
pub struct RunProgress {
    spinner: ProgressBar,
}

impl RunProgress {
    pub fn start(message: impl Into<String>) -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    /// Registers listeners that update the spinner and print finished revisions.
    pub fn attach(&self, dispatcher: &dyn EventDispatcher) {
        for kind in [
            LifecycleEventKind::BeforeMigrateRevision,
            LifecycleEventKind::MigrateRevision,
            LifecycleEventKind::BeforeRollbackRevision,
            LifecycleEventKind::RollbackRevision,
        ] {
            let spinner = self.spinner.clone();
            dispatcher.add_listener(
                kind,
                Arc::new(move |event: &mut LifecycleEvent| {
                    if let Some(line) = progress_line(event) {
                        spinner.println(line);
                    } else if let Some(message) = progress_message(event) {
                        spinner.set_message(message);
                    }
                }),
                // below hook listeners
                -10,
            );
        }
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

fn progress_message(event: &LifecycleEvent) -> Option<String> {
    let revision = event.revision()?;
    match event.kind() {
        LifecycleEventKind::BeforeMigrateRevision => Some(format!(
            "Applying {} on '{}'...",
            revision.filename,
            event.environment()
        )),
        LifecycleEventKind::BeforeRollbackRevision => Some(format!(
            "Reverting {} on '{}'...",
            revision.filename,
            event.environment()
        )),
        _ => None,
    }
}

fn progress_line(event: &LifecycleEvent) -> Option<String> {
    let revision = event.revision()?;
    match event.kind() {
        LifecycleEventKind::MigrateRevision => {
            Some(format!("  {} {}", "▲".green(), revision.filename))
        }
        LifecycleEventKind::RollbackRevision => {
            Some(format!("  {} {}", "▼".yellow(), revision.filename))
        }
        _ => None,
    }
}
