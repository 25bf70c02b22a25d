//! Platform abstraction layer
//!
//! Implementations of the scramble seams for each host:
//! - `headless`: manual frame ticks and an in-memory surface (native demo, tests)
//! - `browser`: `requestAnimationFrame`, DOM element surface, timers (WASM only)

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod browser;
