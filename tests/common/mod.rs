pub mod harness;
pub mod store;

pub use harness::{Harness, HarnessOptions};
pub use repo::{init_repo, memory_db};
pub use store::MemoryStore;
