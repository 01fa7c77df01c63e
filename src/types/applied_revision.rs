use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted fact: `revision` was applied to `environment` at `date`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRevisionRecord {
    pub environment: String,
    pub revision: String,
    pub date: DateTime<Utc>,
}

impl AppliedRevisionRecord {
    pub fn now(environment: &str, revision: &str) -> Self {
        Self {
            environment: environment.to_string(),
            revision: revision.to_string(),
            date: Utc::now(),
        }
    }
}
