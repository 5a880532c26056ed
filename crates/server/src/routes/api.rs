//! JSON API used by the pour page.
//!
//! Unknown beer IDs answer `404 {"error": "Beer not found"}`.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use taplist_core::{BeerId, form, keg};

use crate::db::BeerRepository;
use crate::error::ApiError;
use crate::models::{Beer, PourOutcome};
use crate::state::AppState;

/// Body of a pour request. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct PourRequest {
    #[serde(default)]
    pub amount: Option<Value>,
}

impl PourRequest {
    /// Parse a request body leniently; anything unreadable is an empty request.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Amount to pour, after defaulting.
    #[must_use]
    pub fn amount(&self) -> f64 {
        let requested = match &self.amount {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => form::parse_float(s),
            _ => None,
        };
        keg::pour_amount(requested)
    }
}

/// Beers currently on tap.
///
/// GET /api/beers
#[instrument(skip(state))]
pub async fn list_beers(State(state): State<AppState>) -> Result<Json<Vec<Beer>>, ApiError> {
    let beers = BeerRepository::new(state.pool()).list_on_tap().await?;
    Ok(Json(beers))
}

/// Record a pour.
///
/// POST /api/beers/{id}/pour
#[instrument(skip(state, body))]
pub async fn pour(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<PourOutcome>, ApiError> {
    let id = super::parse_id(&id).ok_or_else(ApiError::beer_not_found)?;
    let amount = PourRequest::from_body(&body).amount();

    let outcome = BeerRepository::new(state.pool()).pour(id, amount).await?;
    tracing::info!(
        beer_id = %id,
        amount,
        pints_remaining = outcome.pints_remaining,
        "Pour recorded"
    );
    Ok(Json(outcome))
}

/// Mark a fresh keg tapped.
///
/// POST /api/beers/{id}/reset-pints
#[instrument(skip(state))]
pub async fn reset_pints(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Beer>, ApiError> {
    let id: BeerId = super::parse_id(&id).ok_or_else(ApiError::beer_not_found)?;
    let beer = BeerRepository::new(state.pool()).reset_pints(id).await?;
    tracing::info!(beer_id = %id, pints_total = beer.pints_total, "Keg reset");
    Ok(Json(beer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pour_amount_from_body() {
        assert!((PourRequest::from_body(br#"{"amount": 5}"#).amount() - 5.0).abs() < f64::EPSILON);
        assert!((PourRequest::from_body(br#"{"amount": "0.5"}"#).amount() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pour_amount_defaults_to_one() {
        for body in [
            &b""[..],
            b"not json",
            b"{}",
            br#"{"amount": null}"#,
            br#"{"amount": -3}"#,
            br#"{"amount": 0}"#,
            br#"{"amount": "lots"}"#,
            br#"{"amount": [1]}"#,
        ] {
            let amount = PourRequest::from_body(body).amount();
            assert!((amount - 1.0).abs() < f64::EPSILON, "body {body:?}");
        }
    }
}
