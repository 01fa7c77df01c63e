pub mod environment_connections;
pub mod environment_log_store;
pub mod executor;
pub mod ledger;

use std::sync::Arc;

pub use environment_connections::EnvironmentConnections;
pub use environment_log_store::EnvironmentLogStore;
pub use executor::MigrationExecutor;
pub use ledger::{AppliedRevisionCache, AppliedRevisionLedger};

use crate::{
    catalog::RevisionCatalog,
    config::Settings,
    events::{EventDispatcher, ListenerDispatcher},
    scripts::ScriptRegistry,
};

pub struct AppServices {
    pub executor: MigrationExecutor,
    pub connections: Arc<EnvironmentConnections>,
}

impl AppServices {
    /// Wires the executor to the configured environments. Nothing connects
    /// until a run touches an environment.
    pub fn new(settings: &Settings, registry: ScriptRegistry) -> Self {
        let connections = Arc::new(EnvironmentConnections::new(settings.environments.clone()));
        let store = Arc::new(EnvironmentLogStore::new(connections.clone()));
        let ledger = Arc::new(AppliedRevisionLedger::new(store));
        let dispatcher: Arc<dyn EventDispatcher> = Arc::new(ListenerDispatcher::new());

        let executor = MigrationExecutor::new(
            RevisionCatalog::new(settings.migrations_dir()),
            Arc::new(registry),
            ledger,
            connections.clone(),
        )
        .with_dispatcher(dispatcher)
        .with_default_environment(settings.default_environment());

        Self {
            executor,
            connections,
        }
    }
}
