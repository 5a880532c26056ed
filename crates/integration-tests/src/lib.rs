//! Integration tests for the tap list.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p taplist-integration-tests
//! ```
//!
//! Every test builds the full router over a private in-memory `SQLite`
//! store and an in-memory image store, then drives it with `axum-test`.
//! No server process or database setup is needed.
//!
//! # Test Categories
//!
//! - `api` - JSON API: listing, pours, keg resets
//! - `admin` - Dashboard, beer forms and lifecycle actions
//! - `uploads` - Image validation on beer and logo forms
//! - `settings` - Taproom name and logo

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use sqlx::SqlitePool;

use taplist_core::BeerId;
use taplist_server::config::TaplistConfig;
use taplist_server::db::{self, BeerRepository};
use taplist_server::models::Beer;
use taplist_server::services::{ImageStore, UploadError};
use taplist_server::{AppState, app};

/// Image store that keeps files in memory.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    /// Paths written so far, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Contents written at `relative_path`.
    pub fn get(&self, relative_path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(relative_path).cloned()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), UploadError> {
        self.files
            .lock()
            .unwrap()
            .insert(relative_path.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// A running router with direct access to its store.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub images: Arc<MemoryImageStore>,
}

impl TestApp {
    /// Build a fresh app over an empty store.
    pub async fn new() -> Self {
        let pool = db::open_in_memory().await.unwrap();
        let images = Arc::new(MemoryImageStore::default());
        let state =
            AppState::with_image_store(TaplistConfig::default(), pool.clone(), images.clone());
        let server = TestServer::new(app(state)).unwrap();

        Self {
            server,
            pool,
            images,
        }
    }

    /// Repository over the app's store.
    pub fn beers(&self) -> BeerRepository<'_> {
        BeerRepository::new(&self.pool)
    }

    /// Submit the admin create form and return the new beer.
    pub async fn create_beer(&self, fields: &[(&str, &str)]) -> Beer {
        let response = self
            .server
            .post("/admin/beers")
            .multipart(text_form(fields))
            .await;
        assert_redirect(&response, "/admin");
        self.latest_beer().await
    }

    /// Create a beer that is on tap.
    pub async fn create_on_tap(&self, name: &str, tap_number: &str, pints_total: &str) -> Beer {
        self.create_beer(&[
            ("name", name),
            ("tap_number", tap_number),
            ("pints_total", pints_total),
        ])
        .await
    }

    /// Most recently created beer.
    pub async fn latest_beer(&self) -> Beer {
        let id: i64 = sqlx::query_scalar("SELECT MAX(id) FROM beers")
            .fetch_one(&self.pool)
            .await
            .unwrap();
        self.beer(BeerId::new(id)).await
    }

    /// Load a beer straight from the store.
    pub async fn beer(&self, id: BeerId) -> Beer {
        self.beers().get(id).await.unwrap().unwrap()
    }
}

/// Multipart form made of text fields only.
pub fn text_form(fields: &[(&str, &str)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(*name, *value)
        })
}

/// File part with the given name and content type.
pub fn file_part(file_name: &str, mime_type: &str, bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string())
}

/// Assert a `303 See Other` to `location`.
pub fn assert_redirect(response: &axum_test::TestResponse, location: &str) {
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), location);
}

/// Assert two pint quantities are equal.
pub fn assert_pints(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected} pints, got {actual}"
    );
}
