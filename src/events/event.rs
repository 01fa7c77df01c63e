use crate::types::{LifecycleEventKind, Revision};

/// A notification fired at one fixed point of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifecycleEvent {
    kind: LifecycleEventKind,
    environment: String,
    revision: Option<Revision>,
    stopped: bool,
}

impl LifecycleEvent {
    pub fn new(kind: LifecycleEventKind, environment: &str) -> Self {
        Self {
            kind,
            environment: environment.to_string(),
            revision: None,
            stopped: false,
        }
    }

    pub fn with_revision(mut self, revision: &Revision) -> Self {
        self.revision = Some(revision.clone());
        self
    }

    pub fn kind(&self) -> LifecycleEventKind {
        self.kind
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn revision(&self) -> Option<&Revision> {
        self.revision.as_ref()
    }

    /// Skips the remaining listeners of this event. Runs are not affected.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
