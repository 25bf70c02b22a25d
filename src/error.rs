//! Error types for the desktop
//!
//! Nothing here is fatal: a missing element or a superseded animation is
//! logged by the caller and the page keeps running.

use thiserror::Error;

/// Errors surfaced by desktop and scramble operations
#[derive(Debug, Error)]
pub enum DesktopError {
    /// The element the scramble should render into is not in the document
    #[error("display surface not found: {selector}")]
    SurfaceMissing { selector: String },

    /// No open window with this id
    #[error("window not found: {0}")]
    WindowNotFound(String),

    /// A newer `set_text` (or `cancel`) replaced this animation before it finished
    #[error("scramble animation superseded")]
    Superseded,

    /// Configuration values that parse but cannot be used
    #[error("invalid config: {0}")]
    Config(String),

    /// Configuration JSON that does not parse
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A DOM call threw
    #[error("dom error: {0}")]
    Dom(String),

    /// The host would not schedule another animation frame
    #[error("frame scheduling failed: {0}")]
    Scheduler(String),
}

impl DesktopError {
    /// Whether this error only means "someone else took over", not a failure
    pub fn is_superseded(&self) -> bool {
        matches!(self, DesktopError::Superseded)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DesktopError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        DesktopError::Dom(format!("{:?}", value))
    }
}

/// Result alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;
