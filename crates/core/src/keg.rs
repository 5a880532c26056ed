//! Keg sizes, pour amounts and the keg-swap policy.
//!
//! Quantities are pints stored as `f64`. The invariant the rest of the system
//! works toward is `0 <= pints_remaining <= pints_total`.
//!
//! # Keg-swap policy
//!
//! Editing a beer with a different total is treated as tapping a fresh keg of
//! the new size: remaining jumps to the new total. Keeping the total leaves
//! remaining alone. Pours clamp at zero. Both rules are applied by the store
//! inside single UPDATE statements so concurrent requests never interleave;
//! this module only resolves the values those statements are given.

/// Size of a standard half-barrel keg in pints.
pub const DEFAULT_KEG_PINTS: f64 = 38.0;

/// Amount poured when a request does not carry a usable amount.
pub const DEFAULT_POUR_PINTS: f64 = 1.0;

/// Name given to beers submitted without one.
pub const PLACEHOLDER_NAME: &str = "Untitled";

/// Resolve the amount to pour.
///
/// Absent, non-finite, zero and negative amounts all fall back to
/// [`DEFAULT_POUR_PINTS`].
#[must_use]
pub fn pour_amount(requested: Option<f64>) -> f64 {
    requested
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .unwrap_or(DEFAULT_POUR_PINTS)
}

/// Validate a submitted keg size. Only positive finite totals are accepted.
#[must_use]
pub fn keg_total(submitted: Option<f64>) -> Option<f64> {
    submitted.filter(|total| total.is_finite() && *total > 0.0)
}

/// Keg size for a newly created beer.
#[must_use]
pub fn initial_total(submitted: Option<f64>) -> f64 {
    keg_total(submitted).unwrap_or(DEFAULT_KEG_PINTS)
}

/// Non-negative ABV; anything else becomes zero.
#[must_use]
pub fn abv(submitted: Option<f64>) -> f64 {
    submitted
        .filter(|abv| abv.is_finite() && *abv >= 0.0)
        .unwrap_or(0.0)
}

/// Display name, replacing blank input with [`PLACEHOLDER_NAME`].
///
/// Anything that is not blank is kept exactly as typed.
#[must_use]
pub fn display_name(submitted: &str) -> String {
    if submitted.trim().is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        submitted.to_string()
    }
}
