use chrono::{DateTime, Utc};

const REVISION_ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// Revision id for a file created at `at`, e.g. `20260105091500`.
pub fn revision_id(at: DateTime<Utc>) -> String {
    at.format(REVISION_ID_FORMAT).to_string()
}

/// Formats the duration between two timestamps as a human-readable string.
///
/// Example output: `"0.148s"`
pub fn format_duration(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> String {
    let duration = ended_at - started_at;
    format!("{:.3}s", duration.num_milliseconds() as f64 / 1000.0)
}
