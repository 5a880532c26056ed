//! Beer domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use taplist_core::{BeerId, BeerStatus, form, keg};

/// A beer on (or waiting for) a tap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Beer {
    /// Unique beer ID.
    pub id: BeerId,
    /// Tap position used for display ordering. Not unique.
    pub tap_number: i64,
    pub name: String,
    pub description: String,
    /// Alcohol by volume, percent.
    pub abv: f64,
    pub style: String,
    pub brewery: String,
    /// URL path of the uploaded image, or empty.
    pub image_path: String,
    /// Pints left in the current keg.
    pub pints_remaining: f64,
    /// Size of the current keg in pints.
    pub pints_total: f64,
    /// Staged for a future tap.
    pub is_draft: bool,
    /// False once soft-deleted.
    pub is_active: bool,
    /// When the beer was created.
    pub created_at: DateTime<Utc>,
    /// When the beer was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Beer {
    /// Lifecycle status derived from the stored flags.
    #[must_use]
    pub const fn status(&self) -> BeerStatus {
        BeerStatus::from_flags(self.is_draft, self.is_active)
    }
}

/// Response to a pour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PourOutcome {
    pub id: BeerId,
    pub name: String,
    pub pints_remaining: f64,
    pub pints_total: f64,
}

/// Input for creating a beer. All values already resolved to their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBeer {
    pub tap_number: i64,
    pub name: String,
    pub description: String,
    pub abv: f64,
    pub style: String,
    pub brewery: String,
    pub image_path: String,
    pub is_draft: bool,
    /// Keg size; remaining starts equal to it.
    pub pints_total: f64,
}

/// Input for editing a beer.
#[derive(Debug, Clone, PartialEq)]
pub struct BeerChanges {
    pub tap_number: i64,
    pub name: String,
    pub description: String,
    pub abv: f64,
    pub style: String,
    pub brewery: String,
    pub is_draft: bool,
    /// New keg size, or `None` to keep the current one.
    pub pints_total: Option<f64>,
    /// New image path, or `None` to keep the current one.
    pub image_path: Option<String>,
}

/// Raw text fields of the admin beer form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeerForm {
    pub tap_number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub abv: Option<String>,
    pub style: Option<String>,
    pub brewery: Option<String>,
    pub is_draft: Option<String>,
    pub pints_total: Option<String>,
}

impl BeerForm {
    /// Record a named text field. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "tap_number" => &mut self.tap_number,
            "name" => &mut self.name,
            "description" => &mut self.description,
            "abv" => &mut self.abv,
            "style" => &mut self.style,
            "brewery" => &mut self.brewery,
            "is_draft" => &mut self.is_draft,
            "pints_total" => &mut self.pints_total,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Resolve into a creation input, substituting defaults for malformed fields.
    #[must_use]
    pub fn into_new_beer(self, image_path: Option<String>) -> NewBeer {
        let pints_total = keg::initial_total(self.pints_total.as_deref().and_then(form::parse_float));
        NewBeer {
            tap_number: parse_tap_number(self.tap_number.as_deref()),
            name: keg::display_name(self.name.as_deref().unwrap_or_default()),
            description: self.description.unwrap_or_default(),
            abv: keg::abv(self.abv.as_deref().and_then(form::parse_float)),
            style: self.style.unwrap_or_default(),
            brewery: self.brewery.unwrap_or_default(),
            image_path: image_path.unwrap_or_default(),
            is_draft: form::parse_flag(self.is_draft.as_deref()),
            pints_total,
        }
    }

    /// Resolve into an edit input. A missing or invalid keg size keeps the current one.
    #[must_use]
    pub fn into_changes(self, image_path: Option<String>) -> BeerChanges {
        BeerChanges {
            tap_number: parse_tap_number(self.tap_number.as_deref()),
            name: keg::display_name(self.name.as_deref().unwrap_or_default()),
            description: self.description.unwrap_or_default(),
            abv: keg::abv(self.abv.as_deref().and_then(form::parse_float)),
            style: self.style.unwrap_or_default(),
            brewery: self.brewery.unwrap_or_default(),
            is_draft: form::parse_flag(self.is_draft.as_deref()),
            pints_total: keg::keg_total(self.pints_total.as_deref().and_then(form::parse_float)),
            image_path,
        }
    }
}

fn parse_tap_number(value: Option<&str>) -> i64 {
    value.and_then(form::parse_int).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> BeerForm {
        let mut form = BeerForm::default();
        for (name, value) in fields {
            form.set(name, (*value).to_string());
        }
        form
    }

    #[test]
    fn test_new_beer_defaults() {
        let beer = BeerForm::default().into_new_beer(None);
        assert_eq!(beer.name, "Untitled");
        assert_eq!(beer.tap_number, 0);
        assert!((beer.pints_total - 38.0).abs() < f64::EPSILON);
        assert!((beer.abv - 0.0).abs() < f64::EPSILON);
        assert!(!beer.is_draft);
        assert!(beer.image_path.is_empty());
    }

    #[test]
    fn test_new_beer_from_fields() {
        let beer = form(&[
            ("tap_number", "4"),
            ("name", "Pale Ale"),
            ("abv", "5.6"),
            ("style", "APA"),
            ("brewery", "Hop Shed"),
            ("is_draft", "on"),
            ("pints_total", "50"),
            ("csrf", "ignored"),
        ])
        .into_new_beer(Some("/uploads/beers/beer-1.png".to_string()));

        assert_eq!(beer.tap_number, 4);
        assert_eq!(beer.name, "Pale Ale");
        assert!((beer.abv - 5.6).abs() < f64::EPSILON);
        assert!(beer.is_draft);
        assert!((beer.pints_total - 50.0).abs() < f64::EPSILON);
        assert_eq!(beer.image_path, "/uploads/beers/beer-1.png");
    }

    #[test]
    fn test_new_beer_non_numeric_total_uses_standard_keg() {
        let beer = form(&[("pints_total", "lots")]).into_new_beer(None);
        assert!((beer.pints_total - 38.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_changes_keep_total_when_blank() {
        let changes = form(&[("name", "Stout"), ("pints_total", "")]).into_changes(None);
        assert_eq!(changes.pints_total, None);
        assert_eq!(changes.image_path, None);
    }

    #[test]
    fn test_changes_carry_new_total() {
        let changes = form(&[("pints_total", "50")]).into_changes(None);
        assert_eq!(changes.pints_total, Some(50.0));
    }

    #[test]
    fn test_status_from_flags() {
        let now = Utc::now();
        let mut beer = Beer {
            id: BeerId::new(1),
            tap_number: 1,
            name: "Pale Ale".to_string(),
            description: String::new(),
            abv: 5.0,
            style: String::new(),
            brewery: String::new(),
            image_path: String::new(),
            pints_remaining: 38.0,
            pints_total: 38.0,
            is_draft: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(beer.status(), BeerStatus::OnTap);
        beer.is_active = false;
        assert_eq!(beer.status(), BeerStatus::Archived);
    }
}
