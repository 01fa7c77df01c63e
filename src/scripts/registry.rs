use std::{collections::HashMap, fmt, path::Path, sync::Arc};

use crate::{
    errors::ScriptResolutionError,
    scripts::{MigrationContext, RevisionScript, StatementScript, StatementSource},
    types::Revision,
};

pub type ScriptFactory = Arc<dyn Fn(MigrationContext) -> Box<dyn RevisionScript> + Send + Sync>;

const STATEMENT_EXTENSION: &str = "sql";

/// Maps script names to the factories that build them.
///
/// A revision resolves to the factory registered under its name. Failing that,
/// a `.sql` revision file resolves to a [`StatementScript`] built from the
/// file's content, unless statement files were turned off.
pub struct ScriptRegistry {
    factories: HashMap<String, ScriptFactory>,
    statement_files: bool,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            statement_files: true,
        }
    }

    pub fn without_statement_files(mut self) -> Self {
        self.statement_files = false;
        self
    }

    /// Registers a factory for `name`, replacing any previous one.
    pub fn register<F, S>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn(MigrationContext) -> S + Send + Sync + 'static,
        S: RevisionScript + 'static,
    {
        self.factories.insert(
            name.to_string(),
            Arc::new(move |ctx| Box::new(factory(ctx)) as Box<dyn RevisionScript>),
        );
        self
    }

    pub fn resolve(
        &self,
        revision: &Revision,
        migrations_dir: &Path,
    ) -> Result<ResolvedRevision, ScriptResolutionError> {
        if let Some(factory) = self.factories.get(&revision.name) {
            return Ok(ResolvedRevision::new(revision.clone(), factory.clone()));
        }

        if self.statement_files && revision.extension() == Some(STATEMENT_EXTENSION) {
            let path = migrations_dir.join(&revision.filename);
            let content = std::fs::read_to_string(&path)
                .map_err(|source| ScriptResolutionError::Unreadable { path, source })?;
            let source = Arc::new(StatementSource::parse(&revision.filename, &content)?);
            let factory: ScriptFactory = Arc::new(move |ctx| {
                Box::new(StatementScript::new(ctx, source.clone())) as Box<dyn RevisionScript>
            });
            return Ok(ResolvedRevision::new(revision.clone(), factory));
        }

        Err(ScriptResolutionError::UnknownScript {
            id: revision.id.clone(),
            name: revision.name.clone(),
            filename: revision.filename.clone(),
        })
    }

    /// Resolves every revision, failing on the first one without a script.
    pub fn resolve_all(
        &self,
        revisions: &[Revision],
        migrations_dir: &Path,
    ) -> Result<Vec<ResolvedRevision>, ScriptResolutionError> {
        revisions
            .iter()
            .map(|r| self.resolve(r, migrations_dir))
            .collect()
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A revision paired with the factory of its script.
#[derive(Clone)]
pub struct ResolvedRevision {
    pub revision: Revision,
    factory: ScriptFactory,
}

impl ResolvedRevision {
    pub fn new(revision: Revision, factory: ScriptFactory) -> Self {
        Self { revision, factory }
    }

    pub fn instantiate(&self, ctx: MigrationContext) -> Box<dyn RevisionScript> {
        (self.factory)(ctx)
    }
}

impl fmt::Debug for ResolvedRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRevision")
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
