//! Desktop configuration
//!
//! Defaults match the live site. A page can override them with an inline
//! `<script type="application/json" id="desktop-config">` block.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{DesktopError, DesktopResult};

/// Upper bound for either frame spread
pub const MAX_FRAME_SPREAD: u32 = 10_000;

/// Scramble timing and glyphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    /// Obfuscation starts at `floor(random * max_start_frames)`
    pub max_start_frames: u32,
    /// Scrambling lasts `floor(random * max_scramble_frames)` frames
    pub max_scramble_frames: u32,
    /// Per-frame chance an active position swaps its noise glyph
    pub dud_chance: f64,
    /// Noise glyphs; repeats weight the draw
    pub palette: String,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            max_start_frames: MAX_START_FRAMES,
            max_scramble_frames: MAX_SCRAMBLE_FRAMES,
            dud_chance: DUD_CHANCE,
            palette: NOISE_GLYPHS.to_string(),
        }
    }
}

impl ScrambleConfig {
    pub fn validate(&self) -> DesktopResult<()> {
        if self.palette.is_empty() {
            return Err(DesktopError::Config("noise palette is empty".to_string()));
        }
        if self.max_start_frames == 0 || self.max_scramble_frames == 0 {
            return Err(DesktopError::Config(
                "frame spreads must be at least 1".to_string(),
            ));
        }
        if self.max_start_frames > MAX_FRAME_SPREAD || self.max_scramble_frames > MAX_FRAME_SPREAD {
            return Err(DesktopError::Config(format!(
                "frame spreads must be at most {}",
                MAX_FRAME_SPREAD
            )));
        }
        if !(0.0..=1.0).contains(&self.dud_chance) {
            return Err(DesktopError::Config(format!(
                "dud_chance {} outside 0..=1",
                self.dud_chance
            )));
        }
        Ok(())
    }

    /// Latest possible reveal frame for these spreads
    pub fn max_reveal_frame(&self) -> u32 {
        self.max_start_frames
            .saturating_sub(1)
            .saturating_add(self.max_scramble_frames.saturating_sub(1))
    }
}

/// Page-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Headline phrases, cycled forever
    pub phrases: Vec<String>,
    /// Pause after each phrase settles (ms)
    pub hold_ms: u32,
    /// Loading screen visible time (ms)
    pub loading_ms: u32,
    /// Loading screen fade-out time (ms)
    pub fade_ms: u32,
    /// Delay between the desktop appearing and the first phrase (ms)
    pub start_delay_ms: u32,
    /// Clock refresh interval (ms)
    pub clock_interval_ms: u32,
    pub scramble: ScrambleConfig,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            hold_ms: PHRASE_HOLD_MS,
            loading_ms: LOADING_SCREEN_MS,
            fade_ms: LOADING_FADE_MS,
            start_delay_ms: SCRAMBLE_START_DELAY_MS,
            clock_interval_ms: CLOCK_INTERVAL_MS,
            scramble: ScrambleConfig::default(),
        }
    }
}

impl DesktopConfig {
    /// DOM id of the inline config block
    pub const ELEMENT_ID: &'static str = "desktop-config";

    /// Parse and validate; missing fields take defaults
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DesktopResult<()> {
        if self.phrases.is_empty() {
            return Err(DesktopError::Config("phrase list is empty".to_string()));
        }
        self.scramble.validate()
    }

    /// Load from the page's inline config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded desktop config ({} phrases)", config.phrases.len());
                    return config;
                }
                Err(e) => log::warn!("Ignoring desktop config: {}", e),
            }
        }

        log::info!("Using default desktop config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
