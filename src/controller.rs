//! Theme resolution, application and toggling.
//!
//! DESIGN
//! ======
//! The controller owns its three collaborators and the config. It keeps no
//! theme field of its own: the applied state is whatever the surface marker
//! says, so the marker, the glyph and the stored value can only change
//! together through [`ThemeController::apply`].
//!
//! Persistence is best-effort. Storage failures are logged and dropped; the
//! visual state is applied regardless. A rejected marker aborts the whole
//! update instead, since the glyph and stored value would then disagree
//! with the page.

use crate::config::ThemeConfig;
use crate::port::{ColorSchemeSignal, PreferenceStore, ThemeSurface};
use crate::theme::Theme;

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

pub struct ThemeController<S, E, D> {
    store: S,
    signal: E,
    surface: D,
    config: ThemeConfig,
}

impl<S, E, D> ThemeController<S, E, D>
where
    S: PreferenceStore,
    E: ColorSchemeSignal,
    D: ThemeSurface,
{
    /// Build a controller without touching any collaborator.
    #[must_use]
    pub fn new(store: S, signal: E, surface: D, config: ThemeConfig) -> Self {
        Self { store, signal, surface, config }
    }

    /// Build and initialize a controller if the page has a control.
    ///
    /// A `None` surface means this page has no toggle. Nothing is read,
    /// applied or stored in that case.
    pub fn mount(store: S, signal: E, surface: Option<D>, config: ThemeConfig) -> Option<Self> {
        let Some(surface) = surface else {
            log::debug!("no #{} control on this page; theme toggle inactive", config.toggle_id);
            return None;
        };
        let mut controller = Self::new(store, signal, surface, config);
        controller.initialize();
        Some(controller)
    }

    /// Resolve the initial theme and apply it.
    pub fn initialize(&mut self) -> Theme {
        let theme = self.resolve();
        self.apply(theme);
        theme
    }

    /// The stored preference if there is one, the environment default if not.
    ///
    /// A failed read counts as "nothing stored".
    #[must_use]
    pub fn resolve(&self) -> Theme {
        let stored = match self.store.load(&self.config.storage_key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("theme preference unreadable, using platform default: {e}");
                None
            }
        };

        if let Some(value) = stored.as_deref() {
            if let Some(theme) = Theme::from_stored(value) {
                if let Err(e) = value.parse::<Theme>() {
                    log::warn!("{e}; treating stored preference as {theme}");
                }
                log::debug!("theme resolved from storage: {theme}");
                return theme;
            }
        }

        let theme = Theme::from_dark(self.signal.prefers_dark());
        log::debug!("theme resolved from platform preference: {theme}");
        theme
    }

    /// Render `theme` onto the surface and persist it.
    ///
    /// Marker, glyph and storage are written in that order on every call, so
    /// repeated calls with the same theme leave the same state behind. If the
    /// marker cannot be set, neither the glyph nor storage is touched.
    pub fn apply(&mut self, theme: Theme) {
        if let Err(e) = self.surface.set_marker(theme.is_dark()) {
            log::warn!("theme {theme} not applied, marker rejected: {e}");
            return;
        }
        self.surface.set_glyph(self.config.glyph_for(theme));

        if let Err(e) = self.store.save(&self.config.storage_key, theme.as_str()) {
            log::warn!("theme preference not persisted: {e}");
        }
        log::debug!("theme applied: {theme}");
    }

    /// Click handler: flip whatever is currently applied.
    ///
    /// Returns the theme applied afterwards, which is unchanged if the marker
    /// was rejected.
    pub fn on_activate(&mut self) -> Theme {
        let next = self.current().toggled();
        self.apply(next);
        self.current()
    }

    /// The applied theme, read from the marker.
    #[must_use]
    pub fn current(&self) -> Theme {
        Theme::from_dark(self.surface.has_marker())
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn surface(&self) -> &D {
        &self.surface
    }
}
