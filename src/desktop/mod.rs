//! Desktop shell state
//!
//! Window manager, taskbar, drag helpers and clock formatting. All of it is
//! plain Rust so it can be tested natively; the browser binary mirrors this
//! state into the DOM.

pub mod clock;
pub mod drag;
pub mod window;

pub use clock::{ClockText, format_clock};
pub use drag::{DragSession, TapTracker, clamp_to_viewport, parse_px};
pub use window::{
    CssBox, Position, TaskbarEntry, WindowManager, WindowRecord, taskbar_label, window_id,
};
