//! Light/dark theme toggle for server-rendered pages.
//!
//! This crate is compiled to WebAssembly and loaded by the page. It resolves
//! the initial theme from `localStorage` (falling back to the platform's
//! `prefers-color-scheme`), applies it as a class marker on the document root,
//! and flips it whenever the user clicks the `#theme-toggle` control.
//!
//! All decision logic lives in [`controller::ThemeController`], which talks to
//! the outside world only through the traits in [`port`]. The browser
//! implementations of those traits live in [`browser`]; the in-memory ones in
//! [`memory`] back the tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | The `Theme` enum and its storage/glyph representations |
//! | [`config`] | `ThemeConfig`: ids, keys and glyphs, loadable from JSON |
//! | [`error`] | `ThemeError` |
//! | [`port`] | Storage, environment and DOM seams |
//! | [`memory`] | In-memory seam implementations |
//! | [`controller`] | Resolve, apply and toggle |
//! | [`browser`] | web-sys bindings and wasm entry points |

pub mod browser;
pub mod config;
pub mod controller;
pub mod error;
pub mod memory;
pub mod port;
pub mod theme;

pub use config::{MarkerTargets, ThemeConfig};
pub use controller::ThemeController;
pub use error::ThemeError;
pub use theme::Theme;
