//! View models shared by the page templates.

use taplist_core::keg::DEFAULT_KEG_PINTS;

use crate::models::Beer;

/// Fraction of the keg below which a tap is flagged as running low.
const LOW_KEG_FRACTION: f64 = 0.15;

/// Beer view for template rendering.
#[derive(Debug, Clone)]
pub struct BeerView {
    pub id: i64,
    pub tap_number: i64,
    pub name: String,
    pub description: String,
    pub abv: String,
    pub style: String,
    pub brewery: String,
    pub image_path: String,
    pub pints_remaining: String,
    pub pints_total: String,
    /// Remaining as a whole percentage of the keg, 0 to 100.
    pub fill_percent: u8,
    pub is_low: bool,
    pub is_empty: bool,
    pub status: &'static str,
    pub status_key: String,
    pub updated_at: String,
}

impl From<&Beer> for BeerView {
    fn from(beer: &Beer) -> Self {
        let fraction = if beer.pints_total > 0.0 {
            (beer.pints_remaining / beer.pints_total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let status = beer.status();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let fill_percent = (fraction * 100.0).round() as u8;

        Self {
            id: beer.id.as_i64(),
            tap_number: beer.tap_number,
            name: beer.name.clone(),
            description: beer.description.clone(),
            abv: format!("{:.1}", beer.abv),
            style: beer.style.clone(),
            brewery: beer.brewery.clone(),
            image_path: beer.image_path.clone(),
            pints_remaining: format!("{:.1}", beer.pints_remaining),
            pints_total: format!("{:.1}", beer.pints_total),
            fill_percent,
            is_low: fraction < LOW_KEG_FRACTION,
            is_empty: beer.pints_remaining <= 0.0,
            status: status.label(),
            status_key: status.to_string(),
            updated_at: beer.updated_at.format("%b %d, %Y %H:%M").to_string(),
        }
    }
}

/// Convert a list of beers into views.
#[must_use]
pub fn beer_views(beers: &[Beer]) -> Vec<BeerView> {
    beers.iter().map(BeerView::from).collect()
}

/// Values pre-filled into the add/edit beer form.
#[derive(Debug, Clone)]
pub struct BeerFormView {
    /// Form target; `/admin/beers` or `/admin/beers/{id}`.
    pub action: String,
    pub is_edit: bool,
    pub tap_number: i64,
    pub name: String,
    pub description: String,
    pub abv: String,
    pub style: String,
    pub brewery: String,
    pub pints_total: String,
    pub pints_remaining: String,
    pub is_draft: bool,
    pub image_path: String,
}

impl BeerFormView {
    /// Empty form for a new beer.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            action: "/admin/beers".to_string(),
            is_edit: false,
            tap_number: 0,
            name: String::new(),
            description: String::new(),
            abv: String::new(),
            style: String::new(),
            brewery: String::new(),
            pints_total: format!("{DEFAULT_KEG_PINTS}"),
            pints_remaining: String::new(),
            is_draft: false,
            image_path: String::new(),
        }
    }
}

impl From<&Beer> for BeerFormView {
    fn from(beer: &Beer) -> Self {
        Self {
            action: format!("/admin/beers/{}", beer.id),
            is_edit: true,
            tap_number: beer.tap_number,
            name: beer.name.clone(),
            description: beer.description.clone(),
            abv: beer.abv.to_string(),
            style: beer.style.clone(),
            brewery: beer.brewery.clone(),
            pints_total: beer.pints_total.to_string(),
            pints_remaining: format!("{:.1}", beer.pints_remaining),
            is_draft: beer.is_draft,
            image_path: beer.image_path.clone(),
        }
    }
}
