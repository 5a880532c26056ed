//! Lifecycle status of a beer.
//!
//! A beer row carries two independent flags, `is_draft` and `is_active`.
//! [`BeerStatus`] names the three states those flags can reach:
//!
//! ```text
//!                  is_draft=true            is_draft=false
//! is_active=true   Draft  ──activate──▶  OnTap
//!                         ◀──to-draft──
//! is_active=false  Archived (from either; terminal)
//! ```

use serde::{Deserialize, Serialize};

/// Where a beer sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeerStatus {
    /// Staged for a future tap; hidden from the display board.
    Draft,
    /// Live and pourable.
    OnTap,
    /// Soft-deleted. No transition leads out of this state.
    Archived,
}

impl BeerStatus {
    /// Derive the status from the stored flags.
    ///
    /// `is_active = false` wins over the draft flag.
    #[must_use]
    pub const fn from_flags(is_draft: bool, is_active: bool) -> Self {
        match (is_active, is_draft) {
            (false, _) => Self::Archived,
            (true, true) => Self::Draft,
            (true, false) => Self::OnTap,
        }
    }

    /// Human-readable label for admin pages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::OnTap => "On Tap",
            Self::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for BeerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::OnTap => write!(f, "on_tap"),
            Self::Archived => write!(f, "archived"),
        }
    }
}
