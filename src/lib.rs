//! Portfolio Desktop - a desktop-style portfolio page
//!
//! Core modules:
//! - `scramble`: Text-scramble headline animation (jobs, frame stepping, scheduling)
//! - `phrases`: Headline phrase rotation
//! - `desktop`: Window manager, taskbar, dragging, clock
//! - `platform`: Browser/headless implementations of frames, surfaces and timers
//! - `config`: Page settings with JSON overrides

pub mod config;
pub mod desktop;
pub mod error;
pub mod phrases;
pub mod platform;
pub mod scramble;

pub use config::{DesktopConfig, ScrambleConfig};
pub use error::{DesktopError, DesktopResult};
pub use phrases::{PhraseCycle, cycle_phrases};
pub use scramble::{Scrambler, TextScramble};

/// Desktop configuration constants
pub mod consts {
    /// Obfuscation starts within this many frames of `set_text`
    pub const MAX_START_FRAMES: u32 = 40;
    /// Each position scrambles for fewer than this many frames
    pub const MAX_SCRAMBLE_FRAMES: u32 = 40;
    /// Chance per frame that an active position swaps its noise glyph
    pub const DUD_CHANCE: f64 = 0.28;
    /// Noise glyphs; the trailing underscores make most noise read as blank
    pub const NOISE_GLYPHS: &str = "!<>-_\\/[]{}\u{2014}=+*^?#________";

    /// Headline phrases, in display order
    pub const DEFAULT_PHRASES: [&str; 5] = [
        "Aman Kumar",
        "AI Innovator",
        "Data Science Enthusiast",
        "Robotics Explorer",
        "Versatile Developer",
    ];
    /// How long a settled phrase stays up (ms)
    pub const PHRASE_HOLD_MS: u32 = 2000;

    /// Loading screen timings (ms)
    pub const LOADING_SCREEN_MS: u32 = 3000;
    pub const LOADING_FADE_MS: u32 = 500;
    pub const SCRAMBLE_START_DELAY_MS: u32 = 100;
    pub const CLOCK_INTERVAL_MS: u32 = 1000;

    /// Window placement
    pub const FIRST_WINDOW_LEFT_PX: i32 = 100;
    pub const FIRST_WINDOW_TOP_PX: i32 = 50;
    pub const CASCADE_STEP_PX: i32 = 30;
    pub const TASKBAR_HEIGHT_PX: u32 = 48;
    /// Windows stack above this z-index
    pub const Z_INDEX_BASE: u32 = 100;

    /// Icon drag/tap handling
    pub const ICON_HOLD_MS: u32 = 150;
    pub const DOUBLE_TAP_WINDOW_MS: f64 = 500.0;
    pub const DEFAULT_ICON_WIDTH_PX: f64 = 80.0;
    pub const DEFAULT_ICON_HEIGHT_PX: f64 = 100.0;
}
