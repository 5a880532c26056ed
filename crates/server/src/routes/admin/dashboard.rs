//! Admin dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::{BeerRepository, SettingsRepository};
use crate::error::Result;
use crate::filters;
use crate::models::Settings;
use crate::routes::views::{BeerView, beer_views};
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct DashboardTemplate {
    pub settings: Settings,
    /// Every live beer, by tap number.
    pub beers: Vec<BeerView>,
    /// Live drafts, most recently changed first.
    pub drafts: Vec<BeerView>,
    /// Beers on tap, by tap number.
    pub on_tap: Vec<BeerView>,
}

/// GET /admin
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<DashboardTemplate> {
    let repo = BeerRepository::new(state.pool());
    let settings = SettingsRepository::new(state.pool()).load().await?;
    let beers = repo.list_active().await?;
    let drafts = repo.list_drafts().await?;
    let on_tap = repo.list_on_tap().await?;

    Ok(DashboardTemplate {
        settings,
        beers: beer_views(&beers),
        drafts: beer_views(&drafts),
        on_tap: beer_views(&on_tap),
    })
}
