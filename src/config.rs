//! Export configuration
//!
//! Everything the export call needs to know is carried by [`ExportConfig`] and passed
//! down explicitly. There is no process-wide state.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ExportResult, IoContext, JsonContext};

/// Base font size used for px to rem conversion
pub const DEFAULT_ROOT_ELEMENT_SIZE: f64 = 16.0;

/// Extra selector that counts as a root scope besides `:root`
pub const DEFAULT_THEME_MARKER: &str = ":host";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// Emit FLOAT values as `rem` instead of `px`
    pub use_rem_unit: bool,
    /// Reserved for unit math; conversions currently use a fixed 16px base
    pub root_element_size: f64,
    /// Fully dereference aliases into the excluded palette groups
    pub ignore_excluded_palette: bool,
    /// Name prefixes (path minus last segment) of the framework's default palette,
    /// e.g. `colors/gray`
    pub excluded_palette_prefixes: HashSet<String>,
    /// Keep the alpha channel of colors as `R G B / A` when it is below 1
    pub preserve_alpha: bool,
    /// Selector that the scope repairer treats like `:root`
    pub theme_marker: String,
    /// Pretty-print the final stylesheet with malva
    pub format_output: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            use_rem_unit: false,
            root_element_size: DEFAULT_ROOT_ELEMENT_SIZE,
            ignore_excluded_palette: false,
            excluded_palette_prefixes: HashSet::new(),
            preserve_alpha: false,
            theme_marker: DEFAULT_THEME_MARKER.to_string(),
            format_output: false,
        }
    }
}

impl ExportConfig {
    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> ExportResult<Self> {
        let content = std::fs::read_to_string(path).with_path(path, "Failed to read config")?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ExportResult<Self> {
        serde_json::from_str(content).with_json_context("Failed to parse export config")
    }

    /// Whether aliases into the group `prefix` must be inlined as literals
    pub fn is_excluded_palette(&self, prefix: &str) -> bool {
        self.ignore_excluded_palette && self.excluded_palette_prefixes.contains(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = ExportConfig::from_json("{}").unwrap();
        assert!(!config.use_rem_unit);
        assert_eq!(config.root_element_size, 16.0);
        assert_eq!(config.theme_marker, ":host");
        assert!(config.excluded_palette_prefixes.is_empty());
    }

    #[test]
    fn test_camel_case_keys() {
        let config = ExportConfig::from_json(
            r#"{
                "useRemUnit": true,
                "ignoreExcludedPalette": true,
                "excludedPalettePrefixes": ["colors/gray"],
                "themeMarker": ".theme"
            }"#,
        )
        .unwrap();
        assert!(config.use_rem_unit);
        assert!(config.is_excluded_palette("colors/gray"));
        assert!(!config.is_excluded_palette("colors/brand"));
        assert_eq!(config.theme_marker, ".theme");
    }

    #[test]
    fn test_excluded_palette_requires_flag() {
        let mut config = ExportConfig::default();
        config.excluded_palette_prefixes.insert("colors/gray".to_string());
        assert!(!config.is_excluded_palette("colors/gray"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ExportConfig::from_json("{ not json").is_err());
    }
}
