use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Fixed points of a run at which listeners are notified.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEventKind {
    Start,
    BeforeMigrate,
    BeforeMigrateRevision,
    MigrateRevision,
    Migrate,
    BeforeRollback,
    BeforeRollbackRevision,
    RollbackRevision,
    Rollback,
    Stop,
}
