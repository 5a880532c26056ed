//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Display board (beers on tap)
//! GET  /pour                          - Mobile pour tracker
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! # Admin (303 redirects after every write)
//! GET  /admin                         - Dashboard
//! GET  /admin/beers/new               - Add beer form
//! POST /admin/beers                   - Create beer (multipart, field `image`)
//! GET  /admin/beers/{id}/edit         - Edit beer form
//! POST /admin/beers/{id}              - Update beer (multipart, field `image`)
//! POST /admin/beers/{id}/delete       - Soft delete
//! POST /admin/beers/{id}/activate     - Put a draft on tap with a full keg
//! POST /admin/beers/{id}/to-draft     - Move back to drafts
//! GET  /admin/settings                - Settings form
//! POST /admin/settings                - Update settings (multipart, field `logo`)
//!
//! # JSON API
//! GET  /api/beers                     - Beers on tap
//! POST /api/beers/{id}/pour           - Pour `{"amount"?: number}`
//! POST /api/beers/{id}/reset-pints    - New keg
//!
//! # Static
//! GET  /public/*                      - Stylesheets and scripts
//! GET  /uploads/*                     - Uploaded images
//! ```

pub mod admin;
pub mod api;
pub mod display;
pub mod views;

use std::time::Duration;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use taplist_core::BeerId;

use crate::state::AppState;

/// Whole-request cap for multipart submissions.
pub const MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/beers", get(api::list_beers))
        .route("/beers/{id}/pour", post(api::pour))
        .route("/beers/{id}/reset-pints", post(api::reset_pints))
}

/// Create all page and API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(display::index))
        .route("/pour", get(display::pour))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/admin", admin::router())
        .nest("/api", api_routes())
}

/// Build the complete application: routes, static files, body limit and
/// request tracing.
pub fn app(state: AppState) -> Router {
    let public_dir = state.config().public_dir.clone();
    let upload_dir = state.config().upload_dir.clone();

    routes()
        .nest_service("/public", ServeDir::new(public_dir))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Parse a beer ID from a path segment.
///
/// Segments that are not a number never match a beer.
#[must_use]
pub fn parse_id(raw: &str) -> Option<BeerId> {
    raw.trim().parse::<i64>().ok().map(BeerId::new)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(BeerId::new(12)));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
    }
}
