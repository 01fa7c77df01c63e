use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use std::sync::Arc;
use tracing::debug;

use crate::{
    errors::ScriptResolutionError,
    scripts::{MigrationContext, RevisionScript},
};

const UP_MARKER: &str = "-- +up";
const DOWN_MARKER: &str = "-- +down";

/// The `-- +up` and `-- +down` sections of a statement file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementSource {
    pub up: String,
    pub down: Option<String>,
}

impl StatementSource {
    pub fn parse(filename: &str, content: &str) -> Result<Self, ScriptResolutionError> {
        let invalid = |reason: &str| ScriptResolutionError::InvalidStatementFile {
            filename: filename.to_string(),
            reason: reason.to_string(),
        };

        let mut up: Option<Vec<&str>> = None;
        let mut down: Option<Vec<&str>> = None;
        let mut in_down = false;

        for line in content.lines() {
            let marker = line.trim().to_ascii_lowercase();
            if marker == UP_MARKER {
                if up.is_some() {
                    return Err(invalid("more than one '-- +up' marker"));
                }
                up = Some(Vec::new());
                in_down = false;
                continue;
            }
            if marker == DOWN_MARKER {
                if down.is_some() {
                    return Err(invalid("more than one '-- +down' marker"));
                }
                down = Some(Vec::new());
                in_down = true;
                continue;
            }

            let section = if in_down { down.as_mut() } else { up.as_mut() };
            if let Some(section) = section {
                section.push(line);
            }
        }

        let up = up.ok_or_else(|| invalid("missing '-- +up' marker"))?;
        Ok(Self {
            up: up.join("\n").trim().to_string(),
            down: down.map(|d| d.join("\n").trim().to_string()),
        })
    }
}

/// Runs the statements of a `.sql` revision file against the environment.
pub struct StatementScript {
    ctx: MigrationContext,
    source: Arc<StatementSource>,
    environment: Option<String>,
}

impl StatementScript {
    pub fn new(ctx: MigrationContext, source: Arc<StatementSource>) -> Self {
        Self {
            ctx,
            source,
            environment: None,
        }
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        if sql.is_empty() {
            return Ok(());
        }
        debug!(
            environment = self.environment.as_deref().unwrap_or(self.ctx.environment()),
            "Executing statements"
        );
        self.ctx
            .db()
            .execute_unprepared(sql)
            .await
            .context("Statement execution failed")?;
        Ok(())
    }
}

#[async_trait]
impl RevisionScript for StatementScript {
    fn bind_environment(&mut self, environment: &str) {
        self.environment = Some(environment.to_string());
    }

    async fn up(&mut self) -> Result<()> {
        self.execute(&self.source.up).await
    }

    async fn down(&mut self) -> Result<()> {
        match &self.source.down {
            Some(sql) => self.execute(sql).await,
            None => bail!("revision has no '-- +down' section and cannot be reverted"),
        }
    }
}
