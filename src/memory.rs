//! In-memory implementations of the [`crate::port`] traits.
//!
//! Used by the controller tests and by hosts that drive the controller
//! outside a browser (server-side prerendering, snapshots).

use std::collections::HashMap;

use crate::error::ThemeError;
use crate::port::{ColorSchemeSignal, PreferenceStore, ThemeSurface};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// How a [`MemoryStore`] responds to reads and writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreMode {
    #[default]
    Normal,
    /// Reads succeed, writes fail (quota exceeded).
    ReadOnly,
    /// Every access fails, as when storage is disabled.
    Unavailable,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    mode: StoreMode,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries, mode: StoreMode::Normal }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: StoreMode) -> Self {
        self.mode = mode;
        self
    }

    /// Peek at an entry regardless of mode.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        if self.mode == StoreMode::Unavailable {
            return Err(ThemeError::StorageUnavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ThemeError> {
        match self.mode {
            StoreMode::Normal => {
                self.entries.insert(key.to_owned(), value.to_owned());
                Ok(())
            }
            StoreMode::ReadOnly => Err(ThemeError::StorageWrite("quota exceeded".into())),
            StoreMode::Unavailable => Err(ThemeError::StorageUnavailable),
        }
    }
}

/// A constant environment signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedSignal(pub bool);

impl ColorSchemeSignal for FixedSignal {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// A marker flag and a glyph string standing in for the DOM.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySurface {
    pub marker: bool,
    pub glyph: String,
    /// When set, `set_marker` fails and leaves the marker unchanged.
    pub reject_marker: bool,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeSurface for MemorySurface {
    fn has_marker(&self) -> bool {
        self.marker
    }

    fn set_marker(&mut self, present: bool) -> Result<(), ThemeError> {
        if self.reject_marker {
            return Err(ThemeError::Dom("class list is read-only".into()));
        }
        self.marker = present;
        Ok(())
    }

    fn set_glyph(&mut self, glyph: &str) {
        glyph.clone_into(&mut self.glyph);
    }
}
