//! Beer create/edit forms and lifecycle actions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::instrument;

use crate::db::{BeerRepository, SettingsRepository};
use crate::error::Result;
use crate::filters;
use crate::models::{BeerForm, Settings};
use crate::routes::parse_id;
use crate::routes::views::BeerFormView;
use crate::services::uploads::{self, UploadKind};
use crate::state::AppState;

use super::{SubmittedForm, found, read_form, to_dashboard};

/// Add/edit beer form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/beer_form.html")]
pub struct BeerFormTemplate {
    pub settings: Settings,
    pub beer: BeerFormView,
}

/// GET /admin/beers/new
#[instrument(skip(state))]
pub async fn new_form(State(state): State<AppState>) -> Result<BeerFormTemplate> {
    let settings = SettingsRepository::new(state.pool()).load().await?;
    Ok(BeerFormTemplate {
        settings,
        beer: BeerFormView::blank(),
    })
}

/// GET /admin/beers/{id}/edit
#[instrument(skip(state))]
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(to_dashboard().into_response());
    };
    let Some(beer) = BeerRepository::new(state.pool()).get(id).await? else {
        return Ok(to_dashboard().into_response());
    };

    let settings = SettingsRepository::new(state.pool()).load().await?;
    Ok(BeerFormTemplate {
        settings,
        beer: BeerFormView::from(&beer),
    }
    .into_response())
}

/// POST /admin/beers
#[instrument(skip(state, multipart))]
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let submitted = read_form(multipart, UploadKind::BeerImage).await?;
    let image_path = store_image(&state, &submitted).await;

    let input = beer_form(submitted).into_new_beer(image_path);
    let beer = BeerRepository::new(state.pool()).create(&input).await?;
    tracing::info!(beer_id = %beer.id, name = %beer.name, is_draft = beer.is_draft, "Beer created");

    Ok(to_dashboard())
}

/// POST /admin/beers/{id}
#[instrument(skip(state, multipart))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Redirect> {
    let Some(id) = parse_id(&id) else {
        return Ok(to_dashboard());
    };
    let repo = BeerRepository::new(state.pool());
    if repo.get(id).await?.is_none() {
        return Ok(to_dashboard());
    }

    let submitted = read_form(multipart, UploadKind::BeerImage).await?;
    let image_path = store_image(&state, &submitted).await;

    let changes = beer_form(submitted).into_changes(image_path);
    if let Some(beer) = found(repo.update(id, &changes).await)? {
        tracing::info!(
            beer_id = %beer.id,
            pints_remaining = beer.pints_remaining,
            pints_total = beer.pints_total,
            "Beer updated"
        );
    }

    Ok(to_dashboard())
}

/// POST /admin/beers/{id}/delete
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    if let Some(id) = parse_id(&id)
        && found(BeerRepository::new(state.pool()).soft_delete(id).await)?.is_some()
    {
        tracing::info!(beer_id = %id, "Beer archived");
    }
    Ok(to_dashboard())
}

/// POST /admin/beers/{id}/activate
#[instrument(skip(state))]
pub async fn activate(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    if let Some(id) = parse_id(&id)
        && found(BeerRepository::new(state.pool()).activate(id).await)?.is_some()
    {
        tracing::info!(beer_id = %id, "Beer put on tap");
    }
    Ok(to_dashboard())
}

/// POST /admin/beers/{id}/to-draft
#[instrument(skip(state))]
pub async fn to_draft(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    if let Some(id) = parse_id(&id)
        && found(BeerRepository::new(state.pool()).to_draft(id).await)?.is_some()
    {
        tracing::info!(beer_id = %id, "Beer moved to drafts");
    }
    Ok(to_dashboard())
}

fn beer_form(submitted: SubmittedForm) -> BeerForm {
    let mut form = BeerForm::default();
    for (name, value) in submitted.fields {
        form.set(&name, value);
    }
    form
}

/// Write an accepted beer image, returning its URL path.
///
/// Storage failures are logged and the record keeps its previous image.
async fn store_image(state: &AppState, submitted: &SubmittedForm) -> Option<String> {
    let image = submitted.image.as_ref()?;
    match uploads::save_image(state.images(), image, Utc::now()).await {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::error!(error = %e, "Failed to store beer image");
            None
        }
    }
}
