//! Schema migrations

use nexus_errors::{AppError, AppResult};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

/// Apply every pending migration of `migrator`
pub async fn run_migrations(pool: &PgPool, migrator: &Migrator) -> AppResult<()> {
    let known = migrator.iter().count();
    migrator
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Migration failed: {}", e)))?;

    info!(known_migrations = known, "Database migrations applied");
    Ok(())
}
