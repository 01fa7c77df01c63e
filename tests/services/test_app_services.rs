use anyhow::Result;
use sea_orm::{ConnectionTrait, Database};
use tempfile::TempDir;
use tidemark::{
    config::{EnvironmentConfig, Settings},
    errors::{ContextError, MigratorError, StorageError},
    repo::{RevisionLogRepository, RevisionLogStore},
    scripts::ScriptRegistry,
    services::AppServices,
};

struct Workspace {
    dir: TempDir,
    settings: Settings,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let migrations = dir.path().join("migrations");
        std::fs::create_dir(&migrations).unwrap();

        let mut settings = Settings::default();
        settings.migrations.dir = migrations.display().to_string();
        settings.migrations.default_environment = "local".to_string();

        let mut ws = Self { dir, settings };
        ws.add_environment("local", None);
        ws
    }

    fn url(&self, file: &str) -> String {
        format!("sqlite://{}?mode=rwc", self.dir.path().join(file).display())
    }

    fn add_environment(&mut self, name: &str, log_file: Option<&str>) {
        let config = EnvironmentConfig {
            log_url: log_file.map(|file| self.url(file)),
            ..EnvironmentConfig::new(&self.url(&format!("{}.db", name)))
        };
        self.settings.environments.insert(name.to_string(), config);
    }

    fn write(&self, file: &str, contents: &str) {
        std::fs::write(self.settings.migrations_dir().join(file), contents).unwrap();
    }

    fn services(&self) -> AppServices {
        AppServices::new(&self.settings, ScriptRegistry::new())
    }

    async fn table_exists(&self, file: &str, table: &str) -> Result<bool> {
        let db = Database::connect(self.url(file)).await?;
        Ok(db
            .execute_unprepared(&format!("SELECT count(*) FROM {}", table))
            .await
            .is_ok())
    }

    async fn logged(&self, file: &str, environment: &str) -> Result<Vec<String>> {
        let db = Database::connect(self.url(file)).await?;
        Ok(RevisionLogRepository::new(db)
            .applied_revisions(environment)
            .await?)
    }
}

#[tokio::test]
async fn test_statement_files_migrate_and_roll_back() -> Result<()> {
    let ws = Workspace::new();
    ws.write(
        "20260101000000_Users.sql",
        "-- +up\nCREATE TABLE users (id INTEGER PRIMARY KEY);\n-- +down\nDROP TABLE users;\n",
    );
    ws.write(
        "20260102000000_Orders.sql",
        "-- +up\nCREATE TABLE orders (id INTEGER PRIMARY KEY);\n-- +down\nDROP TABLE orders;\n",
    );
    let services = ws.services();
    let executor = &services.executor;
    let env = executor.default_environment().to_string();

    let report = executor.migrate(None, &env).await?;
    assert_eq!(report.ids(), vec!["20260101000000", "20260102000000"]);
    assert!(ws.table_exists("local.db", "users").await?);
    assert!(ws.table_exists("local.db", "orders").await?);

    let status = executor.status(&env).await?;
    assert!(status.iter().all(|s| s.is_applied()));

    executor.rollback(None, &env).await?;
    assert!(!ws.table_exists("local.db", "orders").await?);
    assert!(ws.table_exists("local.db", "users").await?);

    let status = executor.status(&env).await?;
    assert!(status[0].is_applied());
    assert!(!status[1].is_applied());
    Ok(())
}

#[tokio::test]
async fn test_log_lives_in_the_environment_database() -> Result<()> {
    let ws = Workspace::new();
    ws.write("001_Seed.sql", "-- +up\nCREATE TABLE seed (id INTEGER);\n");

    ws.services().executor.migrate(None, "local").await?;
    assert_eq!(ws.logged("local.db", "local").await?, vec!["001"]);

    // A second process with its own services finds the watermark in the same place.
    ws.write("002_More.sql", "-- +up\nCREATE TABLE more (id INTEGER);\n");
    let report = ws.services().executor.migrate(None, "local").await?;

    assert_eq!(report.ids(), vec!["002"]);
    assert_eq!(ws.logged("local.db", "local").await?, vec!["001", "002"]);
    Ok(())
}

#[tokio::test]
async fn test_log_url_moves_the_log_out_of_the_environment() -> Result<()> {
    let mut ws = Workspace::new();
    ws.add_environment("audited", Some("audit-log.db"));
    ws.write("001_Seed.sql", "-- +up\nCREATE TABLE seed (id INTEGER);\n");

    ws.services().executor.migrate(None, "audited").await?;

    assert!(ws.table_exists("audited.db", "seed").await?);
    assert!(!ws.table_exists("audited.db", "revision_log").await?);
    assert_eq!(ws.logged("audit-log.db", "audited").await?, vec!["001"]);
    Ok(())
}

#[tokio::test]
async fn test_shared_log_url_keeps_environments_apart() -> Result<()> {
    let mut ws = Workspace::new();
    ws.add_environment("east", Some("central.db"));
    ws.add_environment("west", Some("central.db"));
    ws.write("001_Seed.sql", "-- +up\nCREATE TABLE seed (id INTEGER);\n");
    ws.write("002_More.sql", "-- +up\nCREATE TABLE more (id INTEGER);\n");
    let services = ws.services();

    services.executor.migrate(Some("001"), "east").await?;
    let report = services.executor.migrate(None, "west").await?;

    assert_eq!(report.ids(), vec!["001", "002"]);
    assert_eq!(ws.logged("central.db", "east").await?, vec!["001"]);
    assert_eq!(ws.logged("central.db", "west").await?, vec!["001", "002"]);
    assert!(!ws.table_exists("local.db", "revision_log").await?);
    Ok(())
}

#[tokio::test]
async fn test_statement_without_down_cannot_be_reverted() -> Result<()> {
    let ws = Workspace::new();
    ws.write(
        "001_Seed.sql",
        "-- +up\nCREATE TABLE seed (id INTEGER);\n",
    );
    let services = ws.services();

    services.executor.migrate(None, "local").await?;
    let err = services.executor.rollback(None, "local").await.unwrap_err();

    assert!(matches!(err, MigratorError::ScriptFailed { .. }));
    assert!(err.to_string().contains("-- +down"));
    assert!(ws.table_exists("local.db", "seed").await?);
    Ok(())
}

#[tokio::test]
async fn test_failing_statement_is_not_logged() -> Result<()> {
    let ws = Workspace::new();
    ws.write("001_Good.sql", "-- +up\nCREATE TABLE good (id INTEGER);\n");
    ws.write("002_Broken.sql", "-- +up\nCREATE TABLE (;\n");
    let services = ws.services();

    let err = services.executor.migrate(None, "local").await.unwrap_err();
    assert!(matches!(
        err,
        MigratorError::ScriptFailed { ref revision, .. } if revision == "002"
    ));

    let applied = services.executor.ledger().get_applied("local").await?;
    assert_eq!(applied, vec!["001"]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_environment_has_no_log() -> Result<()> {
    let ws = Workspace::new();
    ws.write("001_Good.sql", "-- +up\nSELECT 1;\n");
    let services = ws.services();

    let err = services.executor.migrate(None, "nowhere").await.unwrap_err();

    assert!(matches!(
        err,
        MigratorError::Storage(StorageError::Unavailable {
            source: ContextError::UnknownEnvironment(ref name),
            ..
        }) if name == "nowhere"
    ));
    Ok(())
}
