mod applied_revision;
mod direction;
mod lifecycle_event_kind;
mod revision;
mod revision_status;
mod run_report;

pub use applied_revision::AppliedRevisionRecord;
pub use direction::Direction;
pub use lifecycle_event_kind::LifecycleEventKind;
pub use revision::Revision;
pub use revision_status::RevisionStatus;
pub use run_report::RunReport;
