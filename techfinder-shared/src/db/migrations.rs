//! Database migration runner.
//!
//! Migrations live in the `migrations/` directory at the workspace root
//! and are embedded at compile time via `sqlx::migrate!`.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Applies every migration that has not been recorded yet. Failed
/// migrations are rolled back and reported as an error.
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration
/// statement fails, or the connection is lost mid-run.
///
/// # Example
///
/// ```no_run
/// use techfinder_shared::db::migrations::run_migrations;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    // Path is relative to this crate's Cargo.toml
    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
