//! Public display board and the mobile pour page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::{BeerRepository, SettingsRepository};
use crate::error::Result;
use crate::filters;
use crate::models::Settings;
use crate::state::AppState;

use super::views::{BeerView, beer_views};

/// Tap list display board template.
#[derive(Template, WebTemplate)]
#[template(path = "display.html")]
pub struct DisplayTemplate {
    pub settings: Settings,
    pub beers: Vec<BeerView>,
}

/// Pour tracker template.
#[derive(Template, WebTemplate)]
#[template(path = "pour.html")]
pub struct PourTemplate {
    pub settings: Settings,
    pub beers: Vec<BeerView>,
}

/// Display board of everything on tap.
///
/// GET /
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<DisplayTemplate> {
    let (settings, beers) = load_on_tap(&state).await?;
    Ok(DisplayTemplate { settings, beers })
}

/// Mobile page for recording pours.
///
/// GET /pour
#[instrument(skip(state))]
pub async fn pour(State(state): State<AppState>) -> Result<PourTemplate> {
    let (settings, beers) = load_on_tap(&state).await?;
    Ok(PourTemplate { settings, beers })
}

async fn load_on_tap(state: &AppState) -> Result<(Settings, Vec<BeerView>)> {
    let settings = SettingsRepository::new(state.pool()).load().await?;
    let beers = BeerRepository::new(state.pool()).list_on_tap().await?;
    Ok((settings, beer_views(&beers)))
}
