pub mod logger;
pub mod parsers;
pub mod progress;
pub mod templates;
pub mod time;

pub use progress::RunProgress;
pub use time::{format_duration, revision_id};
