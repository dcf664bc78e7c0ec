//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! orbit-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Schema migrations live in `crates/storefront/migrations/`. The session
//! table is owned by `tower-sessions-sqlx-store` and created by its own
//! migration.

use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use super::connect;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Session store migration failed: {0}")]
    Sessions(#[from] sqlx::Error),
}

/// Run storefront schema migrations, then create the session table.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn storefront() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations")
        .run(&pool)
        .await
        .map_err(MigrationError::from)?;

    info!("Creating session table...");
    PostgresStore::new(pool)
        .migrate()
        .await
        .map_err(MigrationError::from)?;

    info!("Storefront migrations complete!");
    Ok(())
}
