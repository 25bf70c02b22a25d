//! Browser-free scheduler and surface

use std::cell::{Cell, RefCell};

use crate::error::DesktopResult;
use crate::scramble::{DisplaySurface, FrameHandle, FrameScheduler, RenderedFrame};

type FrameCallback = Box<dyn FnOnce()>;

/// Frame scheduler driven by explicit [`tick`](Self::tick) calls
///
/// Each tick runs only the callbacks that were queued before it started, so
/// a callback that re-arms itself runs again on the next tick, never twice
/// in one.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    next_handle: Cell<i32>,
    ticks: Cell<u64>,
    max_pending: Cell<usize>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame; returns how many callbacks ran
    pub fn tick(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        self.ticks.set(self.ticks.get() + 1);
        let ran = batch.len();
        for (_, callback) in batch {
            callback();
        }
        ran
    }

    /// Tick until nothing is queued or `max_ticks` is reached; returns ticks taken
    pub fn run_until_idle(&self, max_ticks: usize) -> usize {
        let mut taken = 0;
        while self.pending() > 0 && taken < max_ticks {
            self.tick();
            taken += 1;
        }
        taken
    }

    /// Callbacks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Most callbacks ever queued at once
    pub fn max_pending(&self) -> usize {
        self.max_pending.get()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> DesktopResult<FrameHandle> {
        let handle = FrameHandle(self.next_handle.get());
        self.next_handle.set(self.next_handle.get().wrapping_add(1));

        let mut queue = self.queue.borrow_mut();
        queue.push((handle, callback));
        self.max_pending.set(self.max_pending.get().max(queue.len()));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

/// Surface that keeps the last frame in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    text: String,
    html: String,
    writes: usize,
}

impl MemorySurface {
    /// Surface already showing `initial`
    pub fn new(initial: &str) -> Self {
        Self {
            text: initial.to_string(),
            html: initial.to_string(),
            writes: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Frames written so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DisplaySurface for MemorySurface {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn replace(&mut self, frame: &RenderedFrame) {
        self.text = frame.to_plain();
        self.html = frame.to_html();
        self.writes += 1;
    }
}
