use crate::types::{Direction, Revision};

/// What a completed run did, in execution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub direction: Direction,
    pub environment: String,
    pub revisions: Vec<Revision>,
}

impl RunReport {
    pub fn new(direction: Direction, environment: &str) -> Self {
        Self {
            direction,
            environment: environment.to_string(),
            revisions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.revisions.iter().map(|r| r.id.as_str()).collect()
    }
}
