use std::{
    collections::HashSet,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use anyhow::{Result, bail};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use strum::IntoEnumIterator;
use tempfile::TempDir;
use tidemark::{
    catalog::RevisionCatalog,
    errors::ContextError,
    events::{EventDispatcher, LifecycleEvent, ListenerDispatcher},
    scripts::{ContextProvider, MigrationContext, RevisionScript, ScriptRegistry},
    services::{AppliedRevisionLedger, MigrationExecutor},
    types::{LifecycleEventKind, Revision},
};

use super::{MemoryStore, memory_db};

pub type Journal = Arc<Mutex<Vec<String>>>;

/// Hands out one in-memory connection for every environment.
pub struct SharedContexts {
    db: DatabaseConnection,
    calls: AtomicUsize,
}

impl SharedContexts {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContextProvider for SharedContexts {
    async fn context(&self, environment: &str) -> Result<MigrationContext, ContextError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(MigrationContext::new(environment, None, self.db.clone()))
    }
}

/// Appends `<direction>:<env>:<name>` to the journal; fails on demand.
struct RecordingScript {
    name: String,
    environment: Option<String>,
    journal: Journal,
    fail: Arc<AtomicBool>,
}

impl RecordingScript {
    fn log(&self, direction: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            bail!("{} refused to run {}", self.name, direction);
        }
        let environment = self.environment.as_deref().unwrap_or("unbound");
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{}:{}", direction, environment, self.name));
        Ok(())
    }
}

#[async_trait]
impl RevisionScript for RecordingScript {
    fn bind_environment(&mut self, environment: &str) {
        self.environment = Some(environment.to_string());
    }

    async fn up(&mut self) -> Result<()> {
        self.log("up")
    }

    async fn down(&mut self) -> Result<()> {
        self.log("down")
    }
}

#[derive(Default)]
pub struct HarnessOptions {
    /// Script names that fail until `Harness::heal` is called.
    pub failing: Vec<&'static str>,
    /// Script names left out of the registry.
    pub unregistered: Vec<&'static str>,
    pub store: Option<MemoryStore>,
    /// Leaves the executor on its default no-op dispatcher.
    pub without_dispatcher: bool,
}

/// An executor over a temporary migrations directory with recording scripts.
pub struct Harness {
    pub dir: TempDir,
    pub store: Arc<MemoryStore>,
    pub contexts: Arc<SharedContexts>,
    pub executor: MigrationExecutor,
    journal: Journal,
    events: Journal,
    fail: Arc<AtomicBool>,
}

impl Harness {
    pub async fn new(files: &[&str]) -> Self {
        Self::with_options(files, HarnessOptions::default()).await
    }

    pub async fn with_options(files: &[&str], options: HarnessOptions) -> Self {
        let dir = TempDir::new().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), "").unwrap();
        }

        let journal: Journal = Arc::default();
        let fail = Arc::new(AtomicBool::new(true));
        let failing: HashSet<&str> = options.failing.iter().copied().collect();

        let mut registry = ScriptRegistry::new();
        for file in files {
            let Ok(revision) = Revision::from_filename(file) else {
                continue;
            };
            if options.unregistered.contains(&revision.name.as_str()) {
                continue;
            }
            let name = revision.name.clone();
            let journal = journal.clone();
            let fail = if failing.contains(name.as_str()) {
                fail.clone()
            } else {
                Arc::new(AtomicBool::new(false))
            };
            registry.register(&revision.name, move |_ctx| RecordingScript {
                name: name.clone(),
                environment: None,
                journal: journal.clone(),
                fail: fail.clone(),
            });
        }

        let store = Arc::new(options.store.unwrap_or_default());
        let contexts = Arc::new(SharedContexts {
            db: memory_db().await.unwrap(),
            calls: AtomicUsize::new(0),
        });

        let events: Journal = Arc::default();
        let dispatcher = Arc::new(ListenerDispatcher::new());
        for kind in LifecycleEventKind::iter() {
            let events = events.clone();
            dispatcher.add_listener(
                kind,
                Arc::new(move |event: &mut LifecycleEvent| {
                    let entry = match event.revision() {
                        Some(revision) => format!("{}:{}", event.kind(), revision.id),
                        None => event.kind().to_string(),
                    };
                    events.lock().unwrap().push(entry);
                }),
                0,
            );
        }

        let executor = MigrationExecutor::new(
            RevisionCatalog::new(dir.path()),
            Arc::new(registry),
            Arc::new(AppliedRevisionLedger::new(store.clone())),
            contexts.clone(),
        )
        .with_default_environment("test");
        let executor = if options.without_dispatcher {
            executor
        } else {
            executor.with_dispatcher(dispatcher as Arc<dyn EventDispatcher>)
        };

        Self {
            dir,
            store,
            contexts,
            executor,
            journal,
            events,
            fail,
        }
    }

    /// Script invocations so far, then clears them.
    pub fn take_journal(&self) -> Vec<String> {
        std::mem::take(&mut *self.journal.lock().unwrap())
    }

    /// Dispatched events so far, then clears them.
    pub fn take_events(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    /// Lets failing scripts succeed from now on.
    pub fn heal(&self) {
        self.fail.store(false, Ordering::SeqCst);
    }

    pub fn add_file(&self, file: &str) {
        std::fs::write(self.dir.path().join(file), "").unwrap();
    }
}
