//! Browser implementations: animation frames, DOM surface, timers

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::error::{DesktopError, DesktopResult};
use crate::scramble::{DisplaySurface, FrameHandle, FrameScheduler, RenderedFrame};

pub fn window() -> DesktopResult<Window> {
    web_sys::window().ok_or_else(|| DesktopError::Dom("no window".to_string()))
}

pub fn document() -> DesktopResult<Document> {
    window()?
        .document()
        .ok_or_else(|| DesktopError::Dom("no document".to_string()))
}

/// `requestAnimationFrame`-backed scheduler
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new() -> DesktopResult<Self> {
        Ok(Self { window: window()? })
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> DesktopResult<FrameHandle> {
        // once_into_js frees the closure after it fires
        let closure = Closure::once_into_js(move |_time: f64| callback());
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| DesktopError::Scheduler(format!("{:?}", e)))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

/// DOM element the scramble renders into
pub struct ElementSurface {
    element: Element,
}

impl ElementSurface {
    /// First element matching `selector`, or `SurfaceMissing`
    pub fn find(document: &Document, selector: &str) -> DesktopResult<Self> {
        document
            .query_selector(selector)?
            .map(|element| Self { element })
            .ok_or_else(|| DesktopError::SurfaceMissing {
                selector: selector.to_string(),
            })
    }
}

impl DisplaySurface for ElementSurface {
    fn current_text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn replace(&mut self, frame: &RenderedFrame) {
        self.element.set_inner_html(&frame.to_html());
    }
}

/// Run `f` once after `ms`; returns the timeout id
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> DesktopResult<i32> {
    let closure = Closure::once_into_js(f);
    let id = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        ms as i32,
    )?;
    Ok(id)
}

pub fn clear_timeout(id: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(id);
    }
}

/// Run `f` every `ms` for the life of the page
pub fn set_interval(ms: u32, f: impl FnMut() + 'static) -> DesktopResult<i32> {
    let closure = Closure::<dyn FnMut()>::new(f);
    let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        ms as i32,
    )?;
    closure.forget();
    Ok(id)
}

/// Future that resolves after `ms`
pub async fn sleep_ms(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
        }
    });
    if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
        log::warn!("sleep rejected: {:?}", e);
    }
}

/// Milliseconds since the epoch
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
