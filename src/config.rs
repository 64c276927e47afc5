//! Toggle configuration: element id, storage key, marker class and glyphs.
//!
//! Every field defaults to the value the page markup and stylesheets expect,
//! so `ThemeConfig::default()` is the normal configuration. Hosts that need
//! something else pass a JSON object with the fields they want to override.

use serde::Deserialize;

use crate::error::ThemeError;
use crate::theme::Theme;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_STORAGE_KEY: &str = "theme";
pub const DEFAULT_TOGGLE_ID: &str = "theme-toggle";
pub const DEFAULT_MARKER_CLASS: &str = "dark";
/// Sun: shown while dark, click for light.
pub const DEFAULT_DARK_GLYPH: &str = "\u{1F31E}";
/// Moon: shown while light, click for dark.
pub const DEFAULT_LIGHT_GLYPH: &str = "\u{1F319}";
pub const DEFAULT_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";

/// Which root elements carry the marker class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTargets {
    /// `<html>` only.
    Html,
    /// `<body>` only.
    Body,
    /// `<html>` and `<body>`. The applied state is read from `<html>`.
    #[default]
    Both,
}

impl MarkerTargets {
    #[must_use]
    pub fn includes_html(self) -> bool {
        matches!(self, Self::Html | Self::Both)
    }

    #[must_use]
    pub fn includes_body(self) -> bool {
        matches!(self, Self::Body | Self::Both)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// `localStorage` key holding `"dark"` or `"light"`.
    pub storage_key: String,
    /// Id of the control element.
    pub toggle_id: String,
    /// Class toggled on the marker targets while dark.
    pub marker_class: String,
    pub marker_targets: MarkerTargets,
    pub dark_glyph: String,
    pub light_glyph: String,
    /// Media query consulted when nothing is stored.
    pub media_query: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            toggle_id: DEFAULT_TOGGLE_ID.to_owned(),
            marker_class: DEFAULT_MARKER_CLASS.to_owned(),
            marker_targets: MarkerTargets::default(),
            dark_glyph: DEFAULT_DARK_GLYPH.to_owned(),
            light_glyph: DEFAULT_LIGHT_GLYPH.to_owned(),
            media_query: DEFAULT_MEDIA_QUERY.to_owned(),
        }
    }
}

impl ThemeConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ThemeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the DOM or storage cannot use.
    pub fn validate(&self) -> Result<(), ThemeError> {
        require_non_empty("storage_key", &self.storage_key)?;
        require_non_empty("toggle_id", &self.toggle_id)?;
        require_non_empty("marker_class", &self.marker_class)?;
        if self.marker_class.chars().any(char::is_whitespace) {
            return Err(ThemeError::InvalidConfig(format!(
                "marker_class must be a single class token, got {:?}",
                self.marker_class
            )));
        }
        Ok(())
    }

    /// The glyph the control shows while `theme` is applied.
    #[must_use]
    pub fn glyph_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.dark_glyph,
            Theme::Light => &self.light_glyph,
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ThemeError> {
    if value.is_empty() {
        return Err(ThemeError::InvalidConfig(format!("{field} must not be empty")));
    }
    Ok(())
}
