//! Taproom settings: name and logo.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use chrono::Utc;
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::filters;
use crate::models::Settings;
use crate::models::settings::{LOGO_PATH_KEY, TAPROOM_NAME_KEY};
use crate::services::uploads::{self, UploadKind};
use crate::state::AppState;

use super::read_form;

/// Path the settings form posts to and returns to.
pub const SETTINGS_PATH: &str = "/admin/settings";

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    pub settings: Settings,
}

/// GET /admin/settings
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<SettingsTemplate> {
    let settings = SettingsRepository::new(state.pool()).load().await?;
    Ok(SettingsTemplate { settings })
}

/// POST /admin/settings
///
/// A submitted `taproom_name` is stored even when empty. An accepted logo
/// replaces `logo_path`; a rejected one leaves it alone.
#[instrument(skip(state, multipart))]
pub async fn update(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let submitted = read_form(multipart, UploadKind::Logo).await?;
    let repo = SettingsRepository::new(state.pool());

    if let Some(name) = submitted.field(TAPROOM_NAME_KEY) {
        repo.set(TAPROOM_NAME_KEY, name).await?;
    }

    if let Some(image) = &submitted.image {
        match uploads::save_image(state.images(), image, Utc::now()).await {
            Ok(path) => repo.set(LOGO_PATH_KEY, &path).await?,
            Err(e) => tracing::error!(error = %e, "Failed to store logo"),
        }
    }

    Ok(Redirect::to(SETTINGS_PATH))
}
