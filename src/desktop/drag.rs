//! Pointer drag and tap helpers for icons and windows

use crate::consts::{DEFAULT_ICON_HEIGHT_PX, DEFAULT_ICON_WIDTH_PX, DOUBLE_TAP_WINDOW_MS};

/// Element drag anchored at the pointer-down location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    start_pointer: (f64, f64),
    start_origin: (f64, f64),
}

impl DragSession {
    /// `origin` is the element's left/top when the drag began
    pub fn new(pointer: (f64, f64), origin: (f64, f64)) -> Self {
        Self {
            start_pointer: pointer,
            start_origin: origin,
        }
    }

    /// Element origin for the current pointer position
    pub fn position_for(&self, pointer: (f64, f64)) -> (f64, f64) {
        (
            self.start_origin.0 + (pointer.0 - self.start_pointer.0),
            self.start_origin.1 + (pointer.1 - self.start_pointer.1),
        )
    }
}

/// Keep an element of `size` fully inside `viewport`
///
/// A zero width or height (element not laid out yet) falls back to the
/// default icon size.
pub fn clamp_to_viewport(pos: (f64, f64), size: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    let w = if size.0 > 0.0 { size.0 } else { DEFAULT_ICON_WIDTH_PX };
    let h = if size.1 > 0.0 { size.1 } else { DEFAULT_ICON_HEIGHT_PX };
    (
        pos.0.min(viewport.0 - w).max(0.0),
        pos.1.min(viewport.1 - h).max(0.0),
    )
}

/// Parse an inline `left`/`top` value like `"120px"` the way `parseInt` does
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim_start();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse::<i64>().map(|v| v as f64).unwrap_or(0.0)
}

/// Detects double taps on touch screens, where `dblclick` is unreliable
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    last_tap_ms: Option<f64>,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap at `now_ms`; true when it completes a double tap
    pub fn register(&mut self, now_ms: f64) -> bool {
        let double = self
            .last_tap_ms
            .map(|last| {
                let gap = now_ms - last;
                gap > 0.0 && gap < DOUBLE_TAP_WINDOW_MS
            })
            .unwrap_or(false);
        self.last_tap_ms = Some(now_ms);
        double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_follows_delta() {
        let drag = DragSession::new((200.0, 150.0), (40.0, 60.0));
        assert_eq!(drag.position_for((200.0, 150.0)), (40.0, 60.0));
        assert_eq!(drag.position_for((230.0, 140.0)), (70.0, 50.0));
    }

    #[test]
    fn test_clamp_keeps_icon_on_screen() {
        let viewport = (1024.0, 768.0);
        assert_eq!(
            clamp_to_viewport((-30.0, 20.0), (80.0, 100.0), viewport),
            (0.0, 20.0)
        );
        assert_eq!(
            clamp_to_viewport((2000.0, 2000.0), (80.0, 100.0), viewport),
            (944.0, 668.0)
        );
    }

    #[test]
    fn test_clamp_falls_back_to_default_size() {
        let clamped = clamp_to_viewport((5000.0, 5000.0), (0.0, 0.0), (800.0, 600.0));
        assert_eq!(clamped, (800.0 - DEFAULT_ICON_WIDTH_PX, 600.0 - DEFAULT_ICON_HEIGHT_PX));
    }

    #[test]
    fn test_clamp_tiny_viewport_pins_to_origin() {
        assert_eq!(
            clamp_to_viewport((10.0, 10.0), (80.0, 100.0), (50.0, 50.0)),
            (0.0, 0.0)
        );
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("120px"), 120.0);
        assert_eq!(parse_px("-15px"), -15.0);
        assert_eq!(parse_px("33.7px"), 33.0);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
    }

    #[test]
    fn test_double_tap_window() {
        let mut taps = TapTracker::new();
        assert!(!taps.register(1000.0));
        assert!(taps.register(1300.0));
        // Far apart
        assert!(!taps.register(2000.0));
        // Same timestamp does not count
        assert!(!taps.register(2000.0));
        assert!(taps.register(2499.0));
    }
}
