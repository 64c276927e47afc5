//! Seams between the controller and its environment.
//!
//! The controller never touches `window`, `localStorage` or the DOM directly.
//! It is handed one implementation of each trait here: the browser ones in
//! [`crate::browser`], the in-memory ones in [`crate::memory`].

use crate::error::ThemeError;

/// Persistent key-value storage (`localStorage` in the browser).
pub trait PreferenceStore {
    /// Read `key`. `Ok(None)` means the key was never set.
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError>;

    /// Write `value` under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// The host platform's dark-appearance hint.
pub trait ColorSchemeSignal {
    /// Whether the platform prefers dark. Implementations report `false` when
    /// the capability is missing.
    fn prefers_dark(&self) -> bool;
}

/// The page elements the theme is rendered onto: the marker on the root
/// element(s) and the glyph on the control.
pub trait ThemeSurface {
    /// Whether the marker is currently present.
    fn has_marker(&self) -> bool;

    /// Add (`true`) or remove (`false`) the marker on every target.
    fn set_marker(&mut self, present: bool) -> Result<(), ThemeError>;

    /// Replace the control's text with `glyph`.
    fn set_glyph(&mut self, glyph: &str);
}
