use std::{collections::HashMap, sync::Arc};

use tracing::{debug, error, info};

use crate::{
    catalog::RevisionCatalog,
    errors::{CatalogError, MigratorError},
    events::{EventDispatcher, LifecycleEvent, Listener, NoopDispatcher},
    scripts::{ContextProvider, ResolvedRevision, ScriptRegistry},
    services::AppliedRevisionLedger,
    types::{Direction, LifecycleEventKind, Revision, RevisionStatus, RunReport},
};

const DEFAULT_ENVIRONMENT: &str = "development";

/// Applies and reverts revisions against one environment at a time.
///
/// Every step of a run is awaited in order: catalog scan, log reads and writes,
/// script invocations and event dispatch. A failing step aborts the run and
/// leaves the steps before it committed.
pub struct MigrationExecutor {
    catalog: RevisionCatalog,
    registry: Arc<ScriptRegistry>,
    ledger: Arc<AppliedRevisionLedger>,
    contexts: Arc<dyn ContextProvider>,
    dispatcher: Arc<dyn EventDispatcher>,
    default_environment: String,
}

impl MigrationExecutor {
    pub fn new(
        catalog: RevisionCatalog,
        registry: Arc<ScriptRegistry>,
        ledger: Arc<AppliedRevisionLedger>,
        contexts: Arc<dyn ContextProvider>,
    ) -> Self {
        Self {
            catalog,
            registry,
            ledger,
            contexts,
            dispatcher: Arc::new(NoopDispatcher),
            default_environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_default_environment(mut self, environment: &str) -> Self {
        self.default_environment = environment.to_string();
        self
    }

    pub fn default_environment(&self) -> &str {
        &self.default_environment
    }

    pub fn ledger(&self) -> &AppliedRevisionLedger {
        &self.ledger
    }

    pub fn dispatcher(&self) -> &dyn EventDispatcher {
        self.dispatcher.as_ref()
    }

    /// Applies every pending revision up to and including `target`.
    ///
    /// Revisions whose id does not exceed the highest applied id are skipped.
    /// `target` matches a revision id or script name; without a match the run
    /// goes through the whole catalog.
    pub async fn migrate(
        &self,
        target: Option<&str>,
        environment: &str,
    ) -> Result<RunReport, MigratorError> {
        self.trigger(LifecycleEventKind::Start, environment, None);

        let result = self.apply(target, environment).await;
        self.finish(Direction::Up, environment, &result);
        result
    }

    /// Reverts applied revisions, newest first.
    ///
    /// Without `target` exactly one revision is reverted. With `target` every
    /// revision above it is reverted and the target itself stays applied.
    pub async fn rollback(
        &self,
        target: Option<&str>,
        environment: &str,
    ) -> Result<RunReport, MigratorError> {
        self.trigger(LifecycleEventKind::Start, environment, None);

        let Some(latest) = self.ledger.latest_applied(environment).await? else {
            info!(environment, "Nothing to roll back");
            self.trigger(LifecycleEventKind::BeforeRollback, environment, None);
            return Ok(RunReport::new(Direction::Down, environment));
        };

        let result = self.revert(&latest, target, environment).await;
        self.finish(Direction::Down, environment, &result);
        result
    }

    async fn apply(
        &self,
        target: Option<&str>,
        environment: &str,
    ) -> Result<RunReport, MigratorError> {
        let latest = self.ledger.latest_applied(environment).await?;
        let resolved = self.load_resolved()?;
        let mut report = RunReport::new(Direction::Up, environment);

        info!(
            environment,
            latest = latest.as_deref().unwrap_or("none"),
            target = target.unwrap_or("latest"),
            "Migrating"
        );
        self.trigger(LifecycleEventKind::BeforeMigrate, environment, None);

        for entry in &resolved {
            let revision = &entry.revision;
            if latest.as_deref().is_some_and(|latest| revision.id.as_str() <= latest) {
                debug!(environment, revision = %revision.id, "Already applied, skipping");
                continue;
            }

            self.trigger(
                LifecycleEventKind::BeforeMigrateRevision,
                environment,
                Some(revision),
            );
            self.run_script(entry, environment, Direction::Up).await?;
            self.ledger.record_up(&revision.id, environment).await?;
            info!(environment, revision = %revision.id, name = %revision.name, "Applied revision");
            self.trigger(
                LifecycleEventKind::MigrateRevision,
                environment,
                Some(revision),
            );
            report.revisions.push(revision.clone());

            if target.is_some_and(|t| revision.matches(t)) {
                break;
            }
        }

        self.trigger(LifecycleEventKind::Migrate, environment, None);
        Ok(report)
    }

    async fn revert(
        &self,
        latest: &str,
        target: Option<&str>,
        environment: &str,
    ) -> Result<RunReport, MigratorError> {
        self.trigger(LifecycleEventKind::BeforeRollback, environment, None);

        let mut resolved = self.load_resolved()?;
        resolved.reverse();
        let mut report = RunReport::new(Direction::Down, environment);

        info!(
            environment,
            latest,
            target = target.unwrap_or("previous"),
            "Rolling back"
        );

        for entry in &resolved {
            let revision = &entry.revision;
            if revision.id.as_str() > latest {
                continue;
            }
            if target.is_some_and(|t| revision.matches(t)) {
                break;
            }

            self.trigger(
                LifecycleEventKind::BeforeRollbackRevision,
                environment,
                Some(revision),
            );
            self.run_script(entry, environment, Direction::Down).await?;
            self.ledger.record_down(&revision.id, environment).await?;
            info!(environment, revision = %revision.id, name = %revision.name, "Reverted revision");
            self.trigger(
                LifecycleEventKind::RollbackRevision,
                environment,
                Some(revision),
            );
            report.revisions.push(revision.clone());

            if target.is_none() {
                break;
            }
        }

        self.trigger(LifecycleEventKind::Rollback, environment, None);
        Ok(report)
    }

    /// Loads the catalog and resolves every script before anything runs.
    fn load_resolved(&self) -> Result<Vec<ResolvedRevision>, MigratorError> {
        let revisions = self.catalog.list_revisions(None)?;
        Ok(self.registry.resolve_all(&revisions, self.catalog.dir())?)
    }

    async fn run_script(
        &self,
        entry: &ResolvedRevision,
        environment: &str,
        direction: Direction,
    ) -> Result<(), MigratorError> {
        let ctx = self.contexts.context(environment).await?;
        let mut script = entry.instantiate(ctx);
        script.bind_environment(environment);

        let outcome = match direction {
            Direction::Up => script.up().await,
            Direction::Down => script.down().await,
        };

        outcome.map_err(|source| MigratorError::ScriptFailed {
            revision: entry.revision.id.clone(),
            name: entry.revision.name.clone(),
            environment: environment.to_string(),
            direction,
            source,
        })
    }

    fn finish(
        &self,
        direction: Direction,
        environment: &str,
        result: &Result<RunReport, MigratorError>,
    ) {
        match result {
            Ok(report) => {
                self.trigger(LifecycleEventKind::Stop, environment, None);
                info!(
                    environment,
                    %direction,
                    count = report.revisions.len(),
                    "Run finished"
                );
            }
            Err(e) => error!(environment, %direction, error = %e, "Run aborted"),
        }
        self.ledger.invalidate(environment);
    }

    fn trigger(
        &self,
        kind: LifecycleEventKind,
        environment: &str,
        revision: Option<&Revision>,
    ) -> LifecycleEvent {
        let event = LifecycleEvent::new(kind, environment);
        let event = match revision {
            Some(revision) => event.with_revision(revision),
            None => event,
        };
        self.dispatcher.dispatch(event)
    }

    /// Every catalog revision with its applied date in `environment`.
    pub async fn status(&self, environment: &str) -> Result<Vec<RevisionStatus>, MigratorError> {
        let revisions = self.catalog.list_revisions(None)?;
        let applied: HashMap<String, _> = self
            .ledger
            .records(environment)
            .await?
            .into_iter()
            .map(|r| (r.revision, r.date))
            .collect();

        Ok(revisions
            .into_iter()
            .map(|revision| {
                let applied_at = applied.get(&revision.id).copied();
                RevisionStatus {
                    revision,
                    applied_at,
                }
            })
            .collect())
    }

    pub fn available_revisions(&self, limit: Option<usize>) -> Result<Vec<Revision>, CatalogError> {
        self.catalog.list_revisions(limit)
    }

    pub fn attach_event(&self, kind: LifecycleEventKind, listener: Listener, priority: i32) {
        self.dispatcher.add_listener(kind, listener, priority);
    }

    pub fn trigger_event(&self, event: LifecycleEvent) -> LifecycleEvent {
        self.dispatcher.dispatch(event)
    }

    pub fn on_start(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::Start, listener, 0);
    }

    pub fn on_before_migrate(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::BeforeMigrate, listener, 0);
    }

    pub fn on_before_migrate_revision(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::BeforeMigrateRevision, listener, 0);
    }

    pub fn on_migrate_revision(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::MigrateRevision, listener, 0);
    }

    pub fn on_migrate(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::Migrate, listener, 0);
    }

    pub fn on_before_rollback(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::BeforeRollback, listener, 0);
    }

    pub fn on_before_rollback_revision(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::BeforeRollbackRevision, listener, 0);
    }

    pub fn on_rollback_revision(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::RollbackRevision, listener, 0);
    }

    pub fn on_rollback(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::Rollback, listener, 0);
    }

    pub fn on_stop(&self, listener: Listener) {
        self.attach_event(LifecycleEventKind::Stop, listener, 0);
    }
}
