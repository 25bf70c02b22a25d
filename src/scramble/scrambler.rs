//! Frame-stepped scramble core
//!
//! Pure state machine: no scheduling, no DOM. [`Scrambler::step`] computes
//! one frame and advances the counter if anything is still moving.

use super::job::{CharacterJob, JobPhase, build_jobs};
use super::palette::NoisePalette;
use super::random::RandomSource;
use super::surface::RenderedFrame;
use crate::config::ScrambleConfig;

/// Job set plus frame counter for one transition
#[derive(Debug, Clone)]
pub struct Scrambler<R> {
    jobs: Vec<CharacterJob>,
    frame: u32,
    palette: NoisePalette,
    rng: R,
    max_start: u32,
    max_scramble: u32,
    dud_chance: f64,
}

impl<R: RandomSource> Scrambler<R> {
    /// Scrambler with the default palette and timings
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, NoisePalette::default(), &ScrambleConfig::default())
    }

    pub fn with_config(rng: R, palette: NoisePalette, config: &ScrambleConfig) -> Self {
        Self {
            jobs: Vec::new(),
            frame: 0,
            palette,
            rng,
            max_start: config.max_start_frames,
            max_scramble: config.max_scramble_frames,
            dud_chance: config.dud_chance,
        }
    }

    /// Discard the current job set and start a transition from `old` to `new`
    pub fn retarget(&mut self, old: &str, new: &str) {
        self.jobs = build_jobs(old, new, &mut self.rng, self.max_start, self.max_scramble);
        self.frame = 0;
    }

    /// Render the current frame; advance the counter unless everything is revealed
    pub fn step(&mut self) -> RenderedFrame {
        let mut out = RenderedFrame::new(self.frame);
        let mut revealed = 0;

        for job in &mut self.jobs {
            match job.phase_at(self.frame) {
                JobPhase::Revealed => {
                    revealed += 1;
                    if let Some(c) = job.to {
                        out.push_text(c);
                    }
                }
                JobPhase::Scrambling => {
                    let glyph = match job.current_glyph {
                        Some(g) if self.rng.next_unit() >= self.dud_chance => g,
                        _ => self.palette.pick(&mut self.rng),
                    };
                    job.current_glyph = Some(glyph);
                    out.push_noise(glyph);
                }
                JobPhase::Pending => {
                    if let Some(c) = job.from {
                        out.push_text(c);
                    }
                }
            }
        }

        out.complete = revealed == self.jobs.len();
        if !out.complete {
            self.frame += 1;
        }
        out
    }

    /// Skip to the last reveal frame and render it
    pub fn finish(&mut self) -> RenderedFrame {
        self.frame = self.frame.max(self.last_reveal_frame());
        self.step()
    }

    pub fn jobs(&self) -> &[CharacterJob] {
        &self.jobs
    }

    /// Current frame counter (resets to 0 on `retarget`)
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_complete(&self) -> bool {
        self.jobs.iter().all(|j| j.phase_at(self.frame) == JobPhase::Revealed)
    }

    /// Largest reveal frame in the current job set
    pub fn last_reveal_frame(&self) -> u32 {
        self.jobs.iter().map(|j| j.reveal_frame).max().unwrap_or(0)
    }
}
