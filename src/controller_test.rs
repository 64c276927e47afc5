use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::config::{DEFAULT_DARK_GLYPH, DEFAULT_LIGHT_GLYPH};
use crate::error::ThemeError;
use crate::memory::{FixedSignal, MemoryStore, MemorySurface, StoreMode};

// =============================================================
// Helpers
// =============================================================

type TestController = ThemeController<MemoryStore, FixedSignal, MemorySurface>;

/// A store the test keeps a handle to after moving it into the controller.
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl PreferenceStore for SharedStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.0.borrow().load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.0.borrow_mut().save(key, value)
    }
}

fn controller(store: MemoryStore, prefers_dark: bool) -> TestController {
    ThemeController::new(store, FixedSignal(prefers_dark), MemorySurface::new(), ThemeConfig::default())
}

fn mounted(store: MemoryStore, prefers_dark: bool) -> TestController {
    ThemeController::mount(store, FixedSignal(prefers_dark), Some(MemorySurface::new()), ThemeConfig::default())
        .unwrap()
}

/// (marker present, glyph, stored value)
fn observed(c: &TestController) -> (bool, String, Option<String>) {
    (c.surface().marker, c.surface().glyph.clone(), c.store().get("theme").map(str::to_owned))
}

fn assert_dark(c: &TestController) {
    assert_eq!(observed(c), (true, DEFAULT_DARK_GLYPH.to_owned(), Some("dark".to_owned())));
}

fn assert_light(c: &TestController) {
    assert_eq!(observed(c), (false, DEFAULT_LIGHT_GLYPH.to_owned(), Some("light".to_owned())));
}

// =============================================================
// initialize / resolve
// =============================================================

#[test]
fn nothing_stored_platform_prefers_dark() {
    let c = mounted(MemoryStore::new(), true);
    assert_dark(&c);
}

#[test]
fn nothing_stored_platform_prefers_light() {
    let c = mounted(MemoryStore::new(), false);
    assert_light(&c);
}

#[test]
fn stored_light_beats_platform_dark() {
    let c = mounted(MemoryStore::with_entry("theme", "light"), true);
    assert_light(&c);
}

#[test]
fn stored_dark_beats_platform_light() {
    let c = mounted(MemoryStore::with_entry("theme", "dark"), false);
    assert_dark(&c);
}

#[test]
fn empty_stored_value_falls_back_to_platform() {
    let c = mounted(MemoryStore::with_entry("theme", ""), true);
    assert_dark(&c);
}

#[test]
fn unrecognised_stored_value_is_light() {
    let c = mounted(MemoryStore::with_entry("theme", "midnight"), true);
    assert_light(&c);
}

#[test]
fn unreadable_storage_falls_back_to_platform() {
    let c = controller(MemoryStore::new().with_mode(StoreMode::Unavailable), true);
    assert_eq!(c.resolve(), Theme::Dark);
}

#[test]
fn resolve_has_no_side_effects() {
    let c = controller(MemoryStore::new(), true);
    assert_eq!(c.resolve(), Theme::Dark);
    assert!(c.store().is_empty());
    assert!(!c.surface().marker);
    assert!(c.surface().glyph.is_empty());
}

#[test]
fn initialize_returns_applied_theme() {
    let mut c = controller(MemoryStore::new(), false);
    assert_eq!(c.initialize(), Theme::Light);
    assert_eq!(c.current(), Theme::Light);
}

#[test]
fn custom_storage_key_is_used() {
    let config = ThemeConfig { storage_key: "site-theme".into(), ..ThemeConfig::default() };
    let store = MemoryStore::with_entry("site-theme", "dark");
    let c = ThemeController::mount(store, FixedSignal(false), Some(MemorySurface::new()), config).unwrap();
    assert!(c.surface().marker);
    assert_eq!(c.store().get("site-theme"), Some("dark"));
    assert_eq!(c.store().get("theme"), None);
}

// =============================================================
// mount without a control
// =============================================================

#[test]
fn missing_control_mounts_nothing() {
    let result: Option<TestController> =
        ThemeController::mount(MemoryStore::new(), FixedSignal(true), None, ThemeConfig::default());
    assert!(result.is_none());
}

#[test]
fn missing_control_writes_no_default() {
    let store = SharedStore::default();
    let result: Option<ThemeController<SharedStore, FixedSignal, MemorySurface>> =
        ThemeController::mount(store.clone(), FixedSignal(true), None, ThemeConfig::default());
    assert!(result.is_none());
    assert!(store.0.borrow().is_empty());
}

#[test]
fn missing_control_keeps_existing_preference() {
    let store = SharedStore(Rc::new(RefCell::new(MemoryStore::with_entry("theme", "dark"))));
    let result: Option<ThemeController<SharedStore, FixedSignal, MemorySurface>> =
        ThemeController::mount(store.clone(), FixedSignal(false), None, ThemeConfig::default());
    assert!(result.is_none());
    assert_eq!(store.0.borrow().get("theme"), Some("dark"));
}

#[test]
fn shared_store_sees_controller_writes() {
    let store = SharedStore::default();
    let c = ThemeController::mount(store.clone(), FixedSignal(true), Some(MemorySurface::new()), ThemeConfig::default())
        .unwrap();
    assert!(c.surface().marker);
    assert_eq!(store.0.borrow().get("theme"), Some("dark"));
}

// =============================================================
// apply
// =============================================================

#[test]
fn apply_dark_sets_all_three() {
    let mut c = controller(MemoryStore::new(), false);
    c.apply(Theme::Dark);
    assert_dark(&c);
}

#[test]
fn apply_light_clears_marker() {
    let mut c = mounted(MemoryStore::new(), true);
    c.apply(Theme::Light);
    assert_light(&c);
}

#[test]
fn apply_is_idempotent() {
    let mut c = controller(MemoryStore::new(), false);
    c.apply(Theme::Dark);
    let once = observed(&c);
    c.apply(Theme::Dark);
    assert_eq!(observed(&c), once);
    assert_dark(&c);
}

#[test]
fn apply_with_failing_writes_still_renders() {
    let store = MemoryStore::with_entry("theme", "light").with_mode(StoreMode::ReadOnly);
    let mut c = mounted(store, false);
    c.apply(Theme::Dark);
    assert!(c.surface().marker);
    assert_eq!(c.surface().glyph, DEFAULT_DARK_GLYPH);
    assert_eq!(c.store().get("theme"), Some("light"));
}

#[test]
fn apply_with_unavailable_storage_still_renders() {
    let mut c = mounted(MemoryStore::new().with_mode(StoreMode::Unavailable), true);
    assert_eq!(c.current(), Theme::Dark);
    c.apply(Theme::Light);
    assert_eq!(c.current(), Theme::Light);
    assert_eq!(c.surface().glyph, DEFAULT_LIGHT_GLYPH);
}

#[test]
fn rejected_marker_writes_nothing() {
    let surface = MemorySurface { reject_marker: true, ..MemorySurface::new() };
    let mut c = ThemeController::new(MemoryStore::new(), FixedSignal(false), surface, ThemeConfig::default());
    c.apply(Theme::Dark);
    assert!(!c.surface().marker);
    assert!(c.surface().glyph.is_empty());
    assert!(c.store().is_empty());
}

#[test]
fn rejected_marker_keeps_previous_state_consistent() {
    let mut c = mounted(MemoryStore::new(), false);
    c.surface.reject_marker = true;
    assert_eq!(c.on_activate(), Theme::Light);
    assert_light(&c);
    assert_eq!(c.current(), Theme::Light);
}

// =============================================================
// on_activate
// =============================================================

#[test]
fn activate_flips_light_to_dark() {
    let mut c = mounted(MemoryStore::new(), false);
    assert_eq!(c.on_activate(), Theme::Dark);
    assert_dark(&c);
}

#[test]
fn activate_flips_dark_to_light() {
    let mut c = mounted(MemoryStore::new(), true);
    assert_eq!(c.on_activate(), Theme::Light);
    assert_light(&c);
}

#[test]
fn activate_twice_restores_state() {
    for (stored, prefers_dark) in [(None, true), (None, false), (Some("dark"), false), (Some("light"), true)] {
        let store = stored.map_or_else(MemoryStore::new, |v| MemoryStore::with_entry("theme", v));
        let mut c = mounted(store, prefers_dark);
        let before = observed(&c);
        c.on_activate();
        assert_ne!(observed(&c), before);
        c.on_activate();
        assert_eq!(observed(&c), before);
    }
}

#[test]
fn activate_reads_marker_not_storage() {
    let mut c = mounted(MemoryStore::with_entry("theme", "dark"), false);
    // Something else on the page cleared the marker.
    c.surface.marker = false;
    assert_eq!(c.on_activate(), Theme::Dark);
    assert_dark(&c);
}

#[test]
fn custom_glyphs_follow_theme() {
    let config = ThemeConfig { dark_glyph: "light?".into(), light_glyph: "dark?".into(), ..ThemeConfig::default() };
    let mut c = ThemeController::mount(MemoryStore::new(), FixedSignal(false), Some(MemorySurface::new()), config)
        .unwrap();
    assert_eq!(c.surface().glyph, "dark?");
    c.on_activate();
    assert_eq!(c.surface().glyph, "light?");
    assert_eq!(c.config().dark_glyph, "light?");
}
