//! The two visual themes and their persisted form.

use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Stored value for [`Theme::Dark`].
pub const DARK: &str = "dark";
/// Stored value for [`Theme::Light`].
pub const LIGHT: &str = "light";

/// Visual theme of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    /// Map the boolean applied state (marker present or not) to a theme.
    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// The literal written to storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => DARK,
            Self::Light => LIGHT,
        }
    }

    /// Interpret a value read back from storage.
    ///
    /// An empty string counts as unset and yields `None`. Any other value is a
    /// stored preference: `"dark"` is dark, everything else is light.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(Self::from_dark(value == DARK))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse, accepting only the two stored literals.
impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DARK => Ok(Self::Dark),
            LIGHT => Ok(Self::Light),
            other => Err(ThemeError::UnknownTheme(other.to_owned())),
        }
    }
}
