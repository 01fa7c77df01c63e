use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::types::LifecycleEventKind;

/// Shell commands run at lifecycle events. Commands are `tera` templates.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HooksConfig {
    #[serde(default)]
    pub start: Option<Vec<String>>,

    #[serde(default)]
    pub before_migrate: Option<Vec<String>>,

    #[serde(default)]
    pub before_migrate_revision: Option<Vec<String>>,

    #[serde(default)]
    pub migrate_revision: Option<Vec<String>>,

    #[serde(default)]
    pub migrate: Option<Vec<String>>,

    #[serde(default)]
    pub before_rollback: Option<Vec<String>>,

    #[serde(default)]
    pub before_rollback_revision: Option<Vec<String>>,

    #[serde(default)]
    pub rollback_revision: Option<Vec<String>>,

    #[serde(default)]
    pub rollback: Option<Vec<String>>,

    #[serde(default)]
    pub stop: Option<Vec<String>>,
}

impl HooksConfig {
    /// Non-blank commands configured for `kind`.
    pub fn commands(&self, kind: LifecycleEventKind) -> Vec<String> {
        let configured = match kind {
            LifecycleEventKind::Start => &self.start,
            LifecycleEventKind::BeforeMigrate => &self.before_migrate,
            LifecycleEventKind::BeforeMigrateRevision => &self.before_migrate_revision,
            LifecycleEventKind::MigrateRevision => &self.migrate_revision,
            LifecycleEventKind::Migrate => &self.migrate,
            LifecycleEventKind::BeforeRollback => &self.before_rollback,
            LifecycleEventKind::BeforeRollbackRevision => &self.before_rollback_revision,
            LifecycleEventKind::RollbackRevision => &self.rollback_revision,
            LifecycleEventKind::Rollback => &self.rollback,
            LifecycleEventKind::Stop => &self.stop,
        };

        configured
            .iter()
            .flatten()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        LifecycleEventKind::iter().all(|k| self.commands(k).is_empty())
    }
}
