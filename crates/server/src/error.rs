//! Unified error handling with Sentry integration.
//!
//! Page and admin handlers return [`AppError`]; JSON API handlers return
//! [`ApiError`]. Both capture server-side failures to Sentry before
//! responding and never expose internal details to the client.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for HTML routes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Multipart body could not be read. Carries its own status, such as 413
    /// when the request outgrows the body limit.
    #[error("Bad request: {}", .0.body_text())]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Database(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multipart(e) => e.status(),
        };

        if status.is_server_error() {
            capture(&self);
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Error response for JSON API endpoints.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
}

impl ApiError {
    /// Create an API error with the given status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            error: msg.into(),
        }
    }

    /// 404 for an unknown beer.
    #[must_use]
    pub fn beer_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Beer not found")
    }

    /// HTTP status this error responds with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        if matches!(err, RepositoryError::NotFound) {
            return Self::beer_not_found();
        }
        capture(&err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

fn capture(err: &(dyn std::error::Error + 'static)) {
    let event_id = sentry::capture_error(err);
    tracing::error!(
        error = %err,
        sentry_event_id = %event_id,
        "Request error"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Database(sqlx::Error::PoolClosed))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_from_repository() {
        let err = ApiError::from(RepositoryError::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.error, "Beer not found");

        let err = ApiError::from(RepositoryError::Database(sqlx::Error::PoolClosed));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Internal server error");
    }
}
