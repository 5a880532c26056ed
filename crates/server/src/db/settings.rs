//! Settings database operations.
//!
//! Settings are plain key/value text. The two well-known keys are seeded at
//! store initialization and only ever upserted afterwards.

use std::collections::HashMap;

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::settings::{DEFAULT_TAPROOM_NAME, LOGO_PATH_KEY, Settings, TAPROOM_NAME_KEY};

/// Repository for settings database operations.
pub struct SettingsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert default values for the well-known keys, leaving existing values alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn seed_defaults(&self) -> Result<(), RepositoryError> {
        for (key, value) in [(TAPROOM_NAME_KEY, DEFAULT_TAPROOM_NAME), (LOGO_PATH_KEY, "")] {
            sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
                .bind(key)
                .bind(value)
                .execute(self.pool)
                .await?;
        }
        Ok(())
    }

    /// Get a single setting value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let value = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;
        Ok(value)
    }

    /// Insert or replace a setting value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool)
        .await?;
        tracing::info!(key, "Setting updated");
        Ok(())
    }

    /// Load every setting into a map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<HashMap<String, String>, RepositoryError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Load the typed taproom settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn load(&self) -> Result<Settings, RepositoryError> {
        Ok(Settings::from_map(&self.all().await?))
    }
}
