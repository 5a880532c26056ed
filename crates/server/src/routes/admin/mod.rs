//! Admin area: dashboard, beer CRUD and taproom settings.
//!
//! Every write answers `303 See Other`. Writes against an unknown beer are
//! no-ops that land back on the dashboard.

pub mod beers;
pub mod dashboard;
pub mod settings;

use axum::{
    Router,
    extract::Multipart,
    response::Redirect,
    routing::{get, post},
};

use crate::db::RepositoryError;
use crate::error::Result;
use crate::services::uploads::{self, AcceptedImage, UploadError, UploadKind};
use crate::state::AppState;

/// Dashboard path every beer action returns to.
pub const DASHBOARD_PATH: &str = "/admin";

/// Build the admin router, nested under `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/beers", post(beers::create))
        .route("/beers/new", get(beers::new_form))
        .route("/beers/{id}", post(beers::update))
        .route("/beers/{id}/edit", get(beers::edit_form))
        .route("/beers/{id}/delete", post(beers::delete))
        .route("/beers/{id}/activate", post(beers::activate))
        .route("/beers/{id}/to-draft", post(beers::to_draft))
        .route("/settings", get(settings::show).post(settings::update))
}

/// Redirect back to the dashboard.
fn to_dashboard() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

/// Treat a missing beer as a no-op.
fn found<T>(result: std::result::Result<T, RepositoryError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RepositoryError::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Text fields and the optional image of a multipart admin form.
#[derive(Debug, Default)]
pub struct SubmittedForm {
    pub fields: Vec<(String, String)>,
    pub image: Option<AcceptedImage>,
}

impl SubmittedForm {
    /// Value of a text field, if it was submitted.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Drain a multipart form.
///
/// The file field for `kind` is validated while streaming; a rejected or
/// oversized file is logged and dropped so the rest of the form still applies.
///
/// # Errors
///
/// Returns `AppError::Multipart` if the body itself cannot be read, including
/// when it exceeds the request body limit (413).
pub async fn read_form(mut multipart: Multipart, kind: UploadKind) -> Result<SubmittedForm> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == kind.field_name() {
            match uploads::read_image(field, kind).await {
                Ok(image) => form.image = image,
                Err(UploadError::Multipart(e)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(error = %e, field = %name, "Upload rejected");
                    form.image = None;
                }
            }
            continue;
        }

        if field.file_name().is_some() {
            continue;
        }

        let value = field.text().await?;
        form.fields.push((name, value));
    }

    Ok(form)
}
