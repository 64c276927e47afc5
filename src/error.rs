//! Error type shared by the controller and its bindings.

use wasm_bindgen::JsValue;

/// Errors produced while resolving, applying or configuring the theme.
///
/// Storage and DOM variants are logged and swallowed by the controller; only
/// config errors reach the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// `localStorage` is not available in this browsing context.
    #[error("storage unavailable")]
    StorageUnavailable,

    /// Reading the persisted preference failed.
    #[error("storage read failed: {0}")]
    StorageRead(String),

    /// Writing the persisted preference failed (quota, privacy mode).
    #[error("storage write failed: {0}")]
    StorageWrite(String),

    /// A DOM mutation was rejected.
    #[error("DOM update failed: {0}")]
    Dom(String),

    /// There is no `window` or `document` to bind to.
    #[error("no document available")]
    NoDocument,

    /// The page already has a mounted toggle.
    #[error("theme toggle already mounted")]
    AlreadyMounted,

    /// A value is not one of the theme literals.
    #[error("unknown theme: {0:?}")]
    UnknownTheme(String),

    /// Config JSON could not be deserialized.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// Config deserialized but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ThemeError {
    /// Build a storage-read error from a thrown JS value.
    pub(crate) fn storage_read(err: &JsValue) -> Self {
        Self::StorageRead(describe(err))
    }

    pub(crate) fn storage_write(err: &JsValue) -> Self {
        Self::StorageWrite(describe(err))
    }

    pub(crate) fn dom(err: &JsValue) -> Self {
        Self::Dom(describe(err))
    }
}

impl From<ThemeError> for JsValue {
    fn from(err: ThemeError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Best-effort text for a thrown JS value.
fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
