//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::TaplistConfig;
use crate::services::{FsImageStore, ImageStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the store, configuration and image storage.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TaplistConfig,
    pool: SqlitePool,
    images: Arc<dyn ImageStore>,
}

impl AppState {
    /// Create application state writing uploads under `config.upload_dir`.
    #[must_use]
    pub fn new(config: TaplistConfig, pool: SqlitePool) -> Self {
        let images = Arc::new(FsImageStore::new(config.upload_dir.clone()));
        Self::with_image_store(config, pool, images)
    }

    /// Create application state with a custom image store.
    #[must_use]
    pub fn with_image_store(
        config: TaplistConfig,
        pool: SqlitePool,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                images,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &TaplistConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get the image store uploads are written to.
    #[must_use]
    pub fn images(&self) -> &dyn ImageStore {
        self.inner.images.as_ref()
    }
}
