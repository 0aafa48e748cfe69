use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Bridge settings, usually read from a `graft.toml`. Missing keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GraftConfig {
    /// Prop key carrying a pre-resolved native handle or asset.
    pub handle_prop: String,
    /// Property-name suffixes whose array values are joined into flags strings.
    pub multi_value_suffixes: Vec<String>,
    /// Dashes in prop keys spell nesting (`style-width` is `style.width`).
    pub path_dash_alias: bool,
    /// CSS-pixel density bounding rects are expressed in.
    pub reference_dpi: f32,
    /// Name of the inactive object detached containers are parked under.
    pub parking_name: String,
}

impl Default for GraftConfig {
    fn default() -> Self {
        Self {
            handle_prop: "$$$".to_string(),
            multi_value_suffixes: vec!["Flags".to_string(), "Hints".to_string()],
            path_dash_alias: true,
            reference_dpi: 96.0,
            parking_name: "[parking]".to_string(),
        }
    }
}

impl GraftConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded bridge config from {}", path.display());
        Ok(config)
    }
}
