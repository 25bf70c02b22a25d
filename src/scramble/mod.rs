//! Text-scramble animation
//!
//! Each character position gets a job with a random obfuscation window.
//! Positions show their old character, then noise glyphs, then the target
//! character. The job set is stepped one frame per scheduler tick.
//!
//! - `job`: per-position timing records
//! - `scrambler`: pure frame stepping
//! - `animator`: scheduling, surface writes and completion futures

pub mod animator;
pub mod job;
pub mod palette;
pub mod random;
pub mod scrambler;
pub mod surface;
pub mod ticker;

pub use animator::{ScrambleCompletion, TextScramble};
pub use job::{CharacterJob, JobPhase, build_jobs};
pub use palette::NoisePalette;
pub use random::{RandomSource, SequenceSource, seeded};
pub use scrambler::Scrambler;
pub use surface::{DisplaySurface, RenderedFrame, Segment};
pub use ticker::{FrameHandle, FrameScheduler};
