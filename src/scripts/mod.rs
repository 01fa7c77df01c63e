//! Revision scripts and how revisions are resolved to them.

mod context;
mod registry;
mod script;
mod statement;

pub use context::{ContextProvider, MigrationContext};
pub use registry::{ResolvedRevision, ScriptFactory, ScriptRegistry};
pub use script::RevisionScript;
pub use statement::{StatementScript, StatementSource};
