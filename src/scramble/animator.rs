//! Scheduled scramble animation bound to a display surface
//!
//! [`TextScramble`] wraps a [`Scrambler`] with a surface and a frame
//! scheduler. `set_text` cancels any in-flight run, renders the first frame
//! right away, then re-arms itself once per frame until every position is
//! revealed.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use super::palette::NoisePalette;
use super::random::RandomSource;
use super::scrambler::Scrambler;
use super::surface::DisplaySurface;
use super::ticker::{FrameHandle, FrameScheduler};
use crate::config::ScrambleConfig;
use crate::error::{DesktopError, DesktopResult};

struct ScrambleState<S, R> {
    scrambler: Scrambler<R>,
    surface: S,
    pending_frame: Option<FrameHandle>,
    completion: Option<oneshot::Sender<DesktopResult<()>>>,
    /// Bumped on every `set_text`/`cancel`; callbacks from older runs bail out
    generation: u64,
}

/// Text-scramble animator
///
/// Cloning shares the same animation; the clones drive one surface.
pub struct TextScramble<S, R> {
    state: Rc<RefCell<ScrambleState<S, R>>>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl<S, R> Clone for TextScramble<S, R> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

impl<S, R> TextScramble<S, R>
where
    S: DisplaySurface + 'static,
    R: RandomSource + 'static,
{
    /// Animator with the default palette and timings
    pub fn new(surface: S, scheduler: Rc<dyn FrameScheduler>, rng: R) -> Self {
        Self::from_scrambler(surface, scheduler, Scrambler::new(rng))
    }

    /// Animator using a configured palette and timings
    pub fn with_config(
        surface: S,
        scheduler: Rc<dyn FrameScheduler>,
        rng: R,
        config: &ScrambleConfig,
    ) -> DesktopResult<Self> {
        config.validate()?;
        let palette = NoisePalette::new(&config.palette)?;
        Ok(Self::from_scrambler(
            surface,
            scheduler,
            Scrambler::with_config(rng, palette, config),
        ))
    }

    fn from_scrambler(surface: S, scheduler: Rc<dyn FrameScheduler>, scrambler: Scrambler<R>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ScrambleState {
                scrambler,
                surface,
                pending_frame: None,
                completion: None,
                generation: 0,
            })),
            scheduler,
        }
    }

    /// Animate from the surface's current text to `new_text`
    ///
    /// The returned future resolves `Ok(())` once every position shows its
    /// target character, or `Err(Superseded)` if another `set_text` or
    /// [`cancel`](Self::cancel) replaces this run first. If the scheduler
    /// refuses a frame, the target text is drawn at once and the future
    /// resolves with that error.
    pub fn set_text(&self, new_text: &str) -> ScrambleCompletion {
        let (tx, rx) = oneshot::channel();
        let generation = {
            let mut state = self.state.borrow_mut();
            let old_text = state.surface.current_text();
            state.scrambler.retarget(&old_text, new_text);

            if let Some(handle) = state.pending_frame.take() {
                self.scheduler.cancel_frame(handle);
            }
            // Dropping the old sender resolves its receiver with Superseded
            if state.completion.replace(tx).is_some() {
                log::debug!("Superseding in-flight scramble");
            }
            state.generation += 1;

            log::debug!(
                "Scramble to {:?}: {} jobs, last reveal at frame {}",
                new_text,
                state.scrambler.jobs().len(),
                state.scrambler.last_reveal_frame()
            );
            state.generation
        };

        update(&self.state, &self.scheduler, generation);
        ScrambleCompletion { rx }
    }

    /// Stop the running animation, leaving the surface as last drawn
    pub fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(handle) = state.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if state.completion.take().is_some() {
            log::debug!("Scramble cancelled");
        }
        state.generation += 1;
    }

    /// Whether a frame callback is outstanding
    pub fn is_animating(&self) -> bool {
        self.state.borrow().pending_frame.is_some()
    }

    /// Frame counter of the current run
    pub fn frame(&self) -> u32 {
        self.state.borrow().scrambler.frame()
    }

    /// Look at the surface (tests and headless hosts read frames back this way)
    pub fn with_surface<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.state.borrow().surface)
    }

    /// Look at the job set of the current run
    pub fn with_scrambler<T>(&self, f: impl FnOnce(&Scrambler<R>) -> T) -> T {
        f(&self.state.borrow().scrambler)
    }
}

/// One frame of the loop: render, then either resolve or re-arm
fn update<S, R>(
    state: &Rc<RefCell<ScrambleState<S, R>>>,
    scheduler: &Rc<dyn FrameScheduler>,
    generation: u64,
) where
    S: DisplaySurface + 'static,
    R: RandomSource + 'static,
{
    let finished = {
        let mut guard = state.borrow_mut();
        if guard.generation != generation {
            return;
        }
        guard.pending_frame = None;

        let frame = guard.scrambler.step();
        guard.surface.replace(&frame);

        if frame.complete {
            log::debug!("Scramble complete at frame {}", frame.frame);
            guard.completion.take().map(|tx| (tx, Ok(())))
        } else {
            let next_state = Rc::clone(state);
            let next_scheduler = Rc::clone(scheduler);
            let requested = scheduler.request_frame(Box::new(move || {
                update(&next_state, &next_scheduler, generation);
            }));
            match requested {
                Ok(handle) => {
                    guard.pending_frame = Some(handle);
                    None
                }
                Err(e) => {
                    log::error!("Scramble stopped at frame {}: {}", frame.frame, e);
                    let last = guard.scrambler.finish();
                    guard.surface.replace(&last);
                    guard.completion.take().map(|tx| (tx, Err(e)))
                }
            }
        }
    };

    // Send after the borrow ends so a woken task may touch the animator
    if let Some((tx, result)) = finished {
        let _ = tx.send(result);
    }
}

/// Completion of one `set_text` run
#[must_use = "a scramble completion does nothing unless awaited or dropped deliberately"]
#[derive(Debug)]
pub struct ScrambleCompletion {
    rx: oneshot::Receiver<DesktopResult<()>>,
}

impl Future for ScrambleCompletion {
    type Output = Result<(), DesktopError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.unwrap_or(Err(DesktopError::Superseded)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{ManualScheduler, MemorySurface};
    use crate::scramble::random::{SequenceSource, seeded};
    use futures::FutureExt;

    type Animator = TextScramble<MemorySurface, rand_pcg::Pcg32>;

    fn animator(initial: &str, seed: u64) -> (Animator, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let scramble = TextScramble::new(
            MemorySurface::new(initial),
            scheduler.clone(),
            seeded(seed),
        );
        (scramble, scheduler)
    }

    #[test]
    fn test_first_frame_renders_synchronously() {
        let (scramble, scheduler) = animator("AB", 1);
        let _done = scramble.set_text("XYZ");
        assert_eq!(scramble.with_surface(|s| s.writes()), 1);
        assert_eq!(scheduler.pending(), 1);
        assert!(scramble.is_animating());
    }

    #[test]
    fn test_resolves_after_last_reveal() {
        let (scramble, scheduler) = animator("AB", 42);
        let mut done = scramble.set_text("XYZ");
        let last_reveal = scramble.with_scrambler(|s| s.last_reveal_frame());

        for _ in 0..last_reveal {
            assert!((&mut done).now_or_never().is_none());
            assert_eq!(scheduler.tick(), 1);
        }
        assert!(matches!(done.now_or_never(), Some(Ok(()))));
        assert_eq!(scheduler.pending(), 0);
        assert!(!scramble.is_animating());
        assert_eq!(scramble.with_surface(|s| s.text().to_string()), "XYZ");
    }

    #[test]
    fn test_superseded_run_reports_superseded() {
        let (scramble, scheduler) = animator("Hello", 7);
        let first = scramble.set_text("World");
        scheduler.tick();
        let second = scramble.set_text("Again");

        assert!(matches!(
            first.now_or_never(),
            Some(Err(DesktopError::Superseded))
        ));
        // The first loop's callback was cancelled, only the new one is queued
        assert_eq!(scheduler.pending(), 1);

        scheduler.run_until_idle(200);
        assert!(matches!(second.now_or_never(), Some(Ok(()))));
        assert_eq!(scramble.with_surface(|s| s.text().to_string()), "Again");
    }

    #[test]
    fn test_cancel_stops_loop() {
        let (scramble, scheduler) = animator("abc", 3);
        let done = scramble.set_text("xyz");
        let writes = scramble.with_surface(|s| s.writes());
        scramble.cancel();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.tick(), 0);
        assert_eq!(scramble.with_surface(|s| s.writes()), writes);
        assert!(matches!(
            done.now_or_never(),
            Some(Err(DesktopError::Superseded))
        ));
    }

    #[test]
    fn test_empty_target_resolves_immediately_from_empty() {
        let (scramble, scheduler) = animator("", 9);
        let done = scramble.set_text("");
        assert_eq!(scheduler.pending(), 0);
        assert!(matches!(done.now_or_never(), Some(Ok(()))));
    }

    #[test]
    fn test_old_text_comes_from_surface() {
        let (scramble, scheduler) = animator("Aman Kumar", 11);
        let _ = scramble.set_text("AI");
        let froms: String = scramble.with_scrambler(|s| {
            s.jobs().iter().filter_map(|j| j.from).collect()
        });
        assert_eq!(froms, "Aman Kumar");
        scheduler.run_until_idle(200);
    }

    struct RefusingScheduler;

    impl FrameScheduler for RefusingScheduler {
        fn request_frame(&self, _callback: Box<dyn FnOnce()>) -> DesktopResult<FrameHandle> {
            Err(DesktopError::Scheduler("no frames".to_string()))
        }

        fn cancel_frame(&self, _handle: FrameHandle) {}
    }

    #[test]
    fn test_refused_frame_finishes_run() {
        // start = floor(0.5 * 40) = 20, so the first frame still shows old text
        let scramble = TextScramble::new(
            MemorySurface::new("AB"),
            Rc::new(RefusingScheduler),
            SequenceSource::constant(0.5),
        );
        let done = scramble.set_text("XYZ");

        assert!(!scramble.is_animating());
        assert!(matches!(
            done.now_or_never(),
            Some(Err(DesktopError::Scheduler(_)))
        ));
        assert_eq!(scramble.with_surface(|s| s.text().to_string()), "XYZ");
        assert_eq!(scramble.with_surface(|s| s.writes()), 2);
    }

    #[test]
    fn test_config_rejects_empty_palette() {
        let scheduler = Rc::new(ManualScheduler::new());
        let config = ScrambleConfig {
            palette: String::new(),
            ..Default::default()
        };
        let result =
            TextScramble::with_config(MemorySurface::new(""), scheduler, seeded(1), &config);
        assert!(matches!(result, Err(DesktopError::Config(_))));
    }
}
