//! Headline phrase rotation
//!
//! The host driver: scramble to a phrase, wait for it to settle, hold it
//! on screen, move on.

use std::future::Future;

use crate::error::{DesktopError, DesktopResult};
use crate::scramble::{DisplaySurface, RandomSource, TextScramble};

/// Endless cycle over a fixed phrase list
#[derive(Debug, Clone)]
pub struct PhraseCycle {
    phrases: Vec<String>,
    cursor: usize,
}

impl PhraseCycle {
    pub fn new(phrases: Vec<String>) -> DesktopResult<Self> {
        if phrases.is_empty() {
            return Err(DesktopError::Config("phrase list is empty".to_string()));
        }
        Ok(Self { phrases, cursor: 0 })
    }

    /// Phrase to show next; wraps back to the first after the last
    pub fn next_phrase(&mut self) -> &str {
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.phrases.len();
        &self.phrases[idx]
    }

    /// Index the next call to `next_phrase` will return
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Drive `scramble` through `phrases`, holding each for `hold_ms`
///
/// Runs forever when `rounds` is `None`, otherwise for that many phrases.
/// `sleep` supplies the hold delay so browsers and tests can bring their
/// own timers.
pub async fn cycle_phrases<S, R, F, Fut>(
    scramble: &TextScramble<S, R>,
    phrases: &mut PhraseCycle,
    hold_ms: u32,
    rounds: Option<usize>,
    mut sleep: F,
) where
    S: DisplaySurface + 'static,
    R: RandomSource + 'static,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut shown = 0;
    while rounds.is_none_or(|n| shown < n) {
        let phrase = phrases.next_phrase().to_string();
        log::debug!("Setting text to: {}", phrase);

        match scramble.set_text(&phrase).await {
            Ok(()) => log::debug!("Text animation completed for: {}", phrase),
            Err(e) if e.is_superseded() => log::debug!("{:?} was superseded", phrase),
            Err(e) => log::warn!("Text animation failed for {:?}: {}", phrase, e),
        }
        shown += 1;

        sleep(hold_ms).await;
    }
}
