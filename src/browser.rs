//! Browser bindings: `localStorage`, `matchMedia`, the DOM, and the wasm
//! entry points.
//!
//! Everything here is a thin adapter. Decisions are made by
//! [`ThemeController`]; this module only finds the elements, waits for the
//! document to be parsed, and routes clicks to [`ThemeController::on_activate`].

use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Storage, Window};

use crate::config::ThemeConfig;
use crate::controller::ThemeController;
use crate::error::ThemeError;
use crate::port::{ColorSchemeSignal, PreferenceStore, ThemeSurface};

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

/// Controller wired to the real page.
pub type BrowserController = ThemeController<LocalStorage, MediaQuerySignal, DocumentSurface>;

// ── Storage ─────────────────────────────────────────────────────

/// `window.localStorage`, which may be missing or throw on access.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    #[must_use]
    pub fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("localStorage access denied: {e:?}");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, ThemeError> {
        self.storage.as_ref().ok_or(ThemeError::StorageUnavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.storage()?.get_item(key).map_err(|e| ThemeError::storage_read(&e))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.storage()?.set_item(key, value).map_err(|e| ThemeError::storage_write(&e))
    }
}

// ── Environment ─────────────────────────────────────────────────

/// `prefers-color-scheme`, sampled once when constructed.
pub struct MediaQuerySignal {
    prefers_dark: bool,
}

impl MediaQuerySignal {
    #[must_use]
    pub fn new(window: &Window, query: &str) -> Self {
        let prefers_dark = match window.match_media(query) {
            Ok(Some(list)) => list.matches(),
            Ok(None) => false,
            Err(e) => {
                log::debug!("matchMedia({query}) unavailable: {e:?}");
                false
            }
        };
        Self { prefers_dark }
    }
}

impl ColorSchemeSignal for MediaQuerySignal {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}

// ── DOM ─────────────────────────────────────────────────────────

/// The toggle control plus the root elements that carry the marker class.
pub struct DocumentSurface {
    control: Element,
    targets: Vec<Element>,
    marker_class: String,
}

impl DocumentSurface {
    /// Find the control and marker targets. `None` if the page has no control.
    #[must_use]
    pub fn locate(document: &Document, config: &ThemeConfig) -> Option<Self> {
        let control = document.get_element_by_id(&config.toggle_id)?;

        let mut targets = Vec::with_capacity(2);
        if config.marker_targets.includes_html() {
            targets.extend(document.document_element());
        }
        if config.marker_targets.includes_body() {
            targets.extend(document.body().map(Element::from));
        }

        Some(Self { control, targets, marker_class: config.marker_class.clone() })
    }

    #[must_use]
    pub fn control(&self) -> &Element {
        &self.control
    }
}

impl ThemeSurface for DocumentSurface {
    fn has_marker(&self) -> bool {
        self.targets
            .first()
            .is_some_and(|el| el.class_list().contains(&self.marker_class))
    }

    fn set_marker(&mut self, present: bool) -> Result<(), ThemeError> {
        let mut changed: Vec<&Element> = Vec::with_capacity(self.targets.len());
        for el in &self.targets {
            let classes = el.class_list();
            if classes.contains(&self.marker_class) == present {
                continue;
            }
            if let Err(e) = toggle_class(el, &self.marker_class, present) {
                // Put back the targets already switched so they keep agreeing.
                for done in changed {
                    if let Err(undo) = toggle_class(done, &self.marker_class, !present) {
                        log::warn!("theme marker rollback failed: {undo}");
                    }
                }
                return Err(e);
            }
            changed.push(el);
        }
        Ok(())
    }

    fn set_glyph(&mut self, glyph: &str) {
        self.control.set_text_content(Some(glyph));
    }
}

fn toggle_class(el: &Element, class: &str, present: bool) -> Result<(), ThemeError> {
    let classes = el.class_list();
    let outcome = if present { classes.add_1(class) } else { classes.remove_1(class) };
    outcome.map_err(|e| ThemeError::dom(&e))
}

// ── Boot ────────────────────────────────────────────────────────

thread_local! {
    /// Set once a `boot` has claimed the page.
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Claim the page's single toggle. `false` if it was already claimed, since a
/// second click listener would undo every click of the first.
fn claim_mount() -> bool {
    MOUNTED.with(|mounted| !mounted.replace(true))
}

/// Mount the toggle once the document has been parsed.
///
/// If the document is still loading, mounting is deferred to
/// `DOMContentLoaded`. A page without the control is left alone. Only the
/// first successful call mounts; later ones return
/// [`ThemeError::AlreadyMounted`].
pub fn boot(config: ThemeConfig) -> Result<(), ThemeError> {
    config.validate()?;
    let window = web_sys::window().ok_or(ThemeError::NoDocument)?;
    let document = window.document().ok_or(ThemeError::NoDocument)?;
    if !claim_mount() {
        return Err(ThemeError::AlreadyMounted);
    }

    if document.ready_state() == "loading" {
        let deferred = {
            let window = window.clone();
            let document = document.clone();
            Closure::once_into_js(move || {
                if let Err(e) = bind(&window, &document, config) {
                    log::warn!("theme toggle not bound: {e}");
                }
            })
        };
        document
            .add_event_listener_with_callback("DOMContentLoaded", deferred.unchecked_ref())
            .map_err(|e| ThemeError::dom(&e))?;
        log::debug!("theme toggle waiting for DOMContentLoaded");
        return Ok(());
    }

    bind(&window, &document, config)
}

/// Mount the controller and route control clicks to it.
fn bind(window: &Window, document: &Document, config: ThemeConfig) -> Result<(), ThemeError> {
    let surface = DocumentSurface::locate(document, &config);
    let store = LocalStorage::new(window);
    let signal = MediaQuerySignal::new(window, &config.media_query);

    let Some(mut controller) = BrowserController::mount(store, signal, surface, config) else {
        return Ok(());
    };
    let control = controller.surface().control().clone();

    // The listener owns the controller for the lifetime of the page.
    let on_click = Closure::<dyn FnMut()>::new(move || {
        controller.on_activate();
    });
    control
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| ThemeError::dom(&e))?;
    on_click.forget();
    Ok(())
}

// ── wasm entry points ───────────────────────────────────────────

/// Module start: install the panic hook and console logger, then (with the
/// `autostart` feature) mount with the default config.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(e) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {e}");
    }

    #[cfg(feature = "autostart")]
    {
        if let Err(e) = boot(ThemeConfig::default()) {
            log::warn!("theme toggle not started: {e}");
        }
    }
}

/// Mount with a JSON config; fields left out take their defaults.
///
/// Intended for builds without `autostart`. On a page that was already
/// mounted it returns an error and leaves the existing toggle in place.
#[wasm_bindgen(js_name = mountThemeToggle)]
pub fn mount_theme_toggle(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => ThemeConfig::from_json(&json)?,
        None => ThemeConfig::default(),
    };
    boot(config)?;
    Ok(())
}
