//! Taproom settings.

use std::collections::HashMap;

use serde::Serialize;

/// Settings key for the taproom display name.
pub const TAPROOM_NAME_KEY: &str = "taproom_name";

/// Settings key for the logo URL path.
pub const LOGO_PATH_KEY: &str = "logo_path";

/// Name shown until the taproom sets its own.
pub const DEFAULT_TAPROOM_NAME: &str = "My Tap Room";

/// Typed view of the well-known settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Name shown in page headers.
    pub taproom_name: String,
    /// URL path of the uploaded logo, or empty.
    pub logo_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            taproom_name: DEFAULT_TAPROOM_NAME.to_string(),
            logo_path: String::new(),
        }
    }
}

impl Settings {
    /// Build from a raw key/value map, defaulting missing keys.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            taproom_name: map
                .get(TAPROOM_NAME_KEY)
                .cloned()
                .unwrap_or(defaults.taproom_name),
            logo_path: map.get(LOGO_PATH_KEY).cloned().unwrap_or(defaults.logo_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_defaults_missing_keys() {
        let settings = Settings::from_map(&HashMap::new());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_map_reads_known_keys() {
        let map = HashMap::from([
            (TAPROOM_NAME_KEY.to_string(), "Hop Shed".to_string()),
            (LOGO_PATH_KEY.to_string(), "/uploads/logo.png".to_string()),
            ("unrelated".to_string(), "ignored".to_string()),
        ]);
        let settings = Settings::from_map(&map);
        assert_eq!(settings.taproom_name, "Hop Shed");
        assert_eq!(settings.logo_path, "/uploads/logo.png");
    }
}
