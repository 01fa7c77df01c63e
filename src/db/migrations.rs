use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::{debug, info};

/// Brings the revision log schema of `db` up to date and returns how many
/// schema migrations were applied.
pub async fn up(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let pending = migration::Migrator::get_pending_migrations(db).await?.len();
    if pending == 0 {
        debug!("Revision log schema is current");
        return Ok(0);
    }

    migration::Migrator::up(db, None).await?;
    info!(applied = pending, "Revision log schema updated");
    Ok(pending)
}

/// Reverts the last `steps` schema migrations. Reverting the first one drops
/// the log table together with every record in it.
pub async fn down(db: &DatabaseConnection, steps: u32) -> Result<(), DbErr> {
    migration::Migrator::down(db, Some(steps)).await?;
    info!(steps, "Revision log schema reverted");
    Ok(())
}
