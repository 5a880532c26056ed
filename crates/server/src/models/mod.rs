//! Domain models for the tap list.

pub mod beer;
pub mod settings;

pub use beer::{Beer, BeerChanges, BeerForm, NewBeer, PourOutcome};
pub use settings::Settings;
