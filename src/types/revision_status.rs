use chrono::{DateTime, Utc};
use colored::*;

use crate::types::Revision;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevisionStatus {
    pub revision: Revision,
    pub applied_at: Option<DateTime<Utc>>,
}

impl RevisionStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }

    pub fn to_colored_string(&self) -> String {
        if self.is_applied() {
            "APPLIED".green().bold().to_string()
        } else {
            "PENDING".yellow().bold().to_string()
        }
    }
}
