//! Frame scheduling seam
//!
//! The scramble loop asks for exactly one callback per rendered frame.
//! Browsers back this with `requestAnimationFrame`; headless hosts and
//! tests use [`crate::platform::headless::ManualScheduler`].

use crate::error::DesktopResult;

/// Token for a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// One-shot per-frame callback registration
///
/// Implementations must not run `callback` from inside `request_frame`:
/// the animator holds its state borrowed while it schedules.
pub trait FrameScheduler {
    /// Run `callback` on the next frame; on `Err` the callback is dropped unrun
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> DesktopResult<FrameHandle>;

    /// Drop a pending callback; unknown or already-fired handles are ignored
    fn cancel_frame(&self, handle: FrameHandle);
}
