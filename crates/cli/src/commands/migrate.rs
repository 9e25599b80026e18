//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! wl-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `WISHLIST_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `WISHLIST_STORE_TIMEOUT_SECS`, `WISHLIST_DB_MAX_CONNECTIONS` - as for the server
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded at build
//! time.

use wishlist_server::config::{ConfigError, ServerConfig};
use wishlist_server::db;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the wishlist database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if no database is configured, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;
    let database_url = config.require_database_url()?;

    tracing::info!("Connecting to wishlist database...");
    let pool = db::create_pool(database_url, &config.store).await?;

    tracing::info!("Running wishlist migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Wishlist migrations complete!");
    Ok(())
}
