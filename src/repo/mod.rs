pub mod revision_log_repo;
pub mod store;

pub use revision_log_repo::RevisionLogRepository;
pub use store::RevisionLogStore;
