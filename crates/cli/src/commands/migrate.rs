//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! taplist-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `TAPLIST_DATA_DIR` - Directory holding `taplist.db` (default: data)
//!
//! Migrations are embedded from `crates/server/migrations/`. The server also
//! applies them on startup, so this is mainly for provisioning a fresh host.

use taplist_server::config::{ConfigError, TaplistConfig};
use taplist_server::db::{self, MIGRATOR, RepositoryError};
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Open the store, creating it if needed, and apply every pending migration.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is invalid or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = TaplistConfig::from_env()?;
    let db_path = config.database_path();

    tracing::info!(path = %db_path.display(), "Opening database...");
    let pool = db::open(&db_path).await?;

    tracing::info!(
        migrations = MIGRATOR.iter().count(),
        "Migrations complete!"
    );
    pool.close().await;
    Ok(())
}
