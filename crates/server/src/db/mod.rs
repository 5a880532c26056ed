//! Database operations for the tap list `SQLite` store.
//!
//! # Database: `data/taplist.db`
//!
//! ## Tables
//!
//! - `beers` - One row per beer; soft-deleted via `is_active`
//! - `settings` - Taproom-wide key/value settings
//!
//! # Lifecycle
//!
//! [`open`] is the single entry point: it creates the data directory, connects
//! in WAL mode, applies the embedded migrations from `crates/server/migrations/`
//! and seeds default settings. The resulting pool is handed to `AppState`.
//! The CLI exposes the same step as `taplist-cli migrate`.

pub mod beers;
pub mod settings;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use beers::BeerRepository;
pub use settings::SettingsRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The data directory could not be created.
    #[error("data directory error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Open the store at `db_path`, ready for use.
///
/// # Errors
///
/// Returns `RepositoryError` if the directory cannot be created, the database
/// cannot be opened, or migrations fail.
pub async fn open(db_path: &Path) -> Result<SqlitePool, RepositoryError> {
    let pool = create_pool(db_path).await?;
    initialize(&pool).await?;
    Ok(pool)
}

/// Open a private in-memory store.
///
/// The pool holds exactly one connection because every `SQLite` in-memory
/// connection is its own database.
///
/// # Errors
///
/// Returns `RepositoryError` if the connection or migrations fail.
pub async fn open_in_memory() -> Result<SqlitePool, RepositoryError> {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await?;
    initialize(&pool).await?;
    Ok(pool)
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The parent directory of `db_path` is created if missing.
///
/// # Errors
///
/// Returns `RepositoryError` if the directory or the connection cannot be created.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool, RepositoryError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let opts = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(opts)
        .await?;

    Ok(pool)
}

/// Apply migrations and seed default settings.
///
/// # Errors
///
/// Returns `RepositoryError` if a migration or the seed insert fails.
pub async fn initialize(pool: &SqlitePool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    SettingsRepository::new(pool).seed_defaults().await?;
    tracing::debug!("Store initialized");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("taplist.db");

        let pool = open(&db_path).await.unwrap();
        assert!(db_path.exists());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beers")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_initialize_is_repeatable() {
        let pool = open_in_memory().await.unwrap();
        initialize(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
