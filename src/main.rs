//! Portfolio Desktop entry point
//!
//! Handles platform-specific initialization: DOM wiring and the headline
//! loop in the browser, a terminal demo of the scramble natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_desktop {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, Event, HtmlElement, MouseEvent, TouchEvent,
    };

    use portfolio_desktop::config::DesktopConfig;
    use portfolio_desktop::consts::ICON_HOLD_MS;
    use portfolio_desktop::desktop::{
        DragSession, Position, TapTracker, WindowManager, WindowRecord, clamp_to_viewport, clock,
        parse_px, window_id,
    };
    use portfolio_desktop::platform::browser::{
        AnimationFrameScheduler, ElementSurface, clear_timeout, document, now_ms, set_interval,
        set_timeout, sleep_ms,
    };
    use portfolio_desktop::scramble::{TextScramble, seeded};
    use portfolio_desktop::{PhraseCycle, cycle_phrases};

    /// Desktop shell state shared by the event handlers
    struct Desktop {
        windows: WindowManager,
        window_drag: Option<(String, DragSession)>,
        icon_drag: Option<(HtmlElement, DragSession)>,
        icon_hold_timer: Option<i32>,
        taps: TapTracker,
    }

    impl Desktop {
        fn new() -> Self {
            Self {
                windows: WindowManager::new(),
                window_drag: None,
                icon_drag: None,
                icon_hold_timer: None,
                taps: TapTracker::new(),
            }
        }

        /// Open the window for `app` if the page has one
        fn open_app(&mut self, document: &Document, app: &str) {
            if document.get_element_by_id(&window_id(app)).is_none() {
                log::warn!("No window element for app {}", app);
                return;
            }
            self.windows.open(app);
        }
    }

    type Shared = Rc<RefCell<Desktop>>;

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Portfolio desktop starting...");

        let document = match document() {
            Ok(d) => d,
            Err(e) => {
                log::error!("Cannot start desktop: {}", e);
                return;
            }
        };

        let config = DesktopConfig::load();
        let desktop: Shared = Rc::new(RefCell::new(Desktop::new()));

        setup_icon_open(&document, desktop.clone());
        setup_window_controls(&document, desktop.clone());
        setup_window_dragging(&document, desktop.clone());
        setup_icon_dragging(&document, desktop.clone());
        sync_dom(&document, &desktop.borrow().windows);

        update_clock(&document);
        {
            let document = document.clone();
            if let Err(e) = set_interval(config.clock_interval_ms, move || update_clock(&document)) {
                log::warn!("Clock will not tick: {}", e);
            }
        }

        show_loading_screen(&document, config);

        log::info!("Portfolio desktop running!");
    }

    /// Fade the loading screen out, then start the headline
    fn show_loading_screen(document: &Document, config: DesktopConfig) {
        let Some(loading) = document.get_element_by_id("loadingScreen") else {
            log::info!("No loading screen, starting headline directly");
            init_text_animation(document, config);
            return;
        };

        let document = document.clone();
        let result = set_timeout(config.loading_ms, move || {
            let _ = loading.class_list().add_1("fade-out");
            let fade_ms = config.fade_ms;
            let hide = move || {
                if let Some(el) = loading.dyn_ref::<HtmlElement>() {
                    let _ = el.style().set_property("display", "none");
                }
                init_text_animation(&document, config);
            };
            if let Err(e) = set_timeout(fade_ms, hide) {
                log::error!("Loading screen timer failed: {}", e);
            }
        });
        if let Err(e) = result {
            log::error!("Loading screen timer failed: {}", e);
        }
    }

    fn init_text_animation(document: &Document, config: DesktopConfig) {
        log::info!("Initializing desktop text animation...");

        let surface = match ElementSurface::find(document, ".text-scramble") {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Skipping headline animation: {}", e);
                return;
            }
        };
        let scheduler = match AnimationFrameScheduler::new() {
            Ok(s) => Rc::new(s),
            Err(e) => {
                log::error!("Skipping headline animation: {}", e);
                return;
            }
        };

        let seed = now_ms() as u64;
        let scramble =
            match TextScramble::with_config(surface, scheduler, seeded(seed), &config.scramble) {
                Ok(s) => s,
                Err(e) => {
                    log::error!("Skipping headline animation: {}", e);
                    return;
                }
            };
        let mut phrases = match PhraseCycle::new(config.phrases) {
            Ok(p) => p,
            Err(e) => {
                log::error!("Skipping headline animation: {}", e);
                return;
            }
        };
        log::info!("Headline scramble created with seed: {}", seed);

        let hold_ms = config.hold_ms;
        let start = move || {
            wasm_bindgen_futures::spawn_local(async move {
                log::info!("Starting text animation...");
                cycle_phrases(&scramble, &mut phrases, hold_ms, None, sleep_ms).await;
            });
        };
        if let Err(e) = set_timeout(config.start_delay_ms, start) {
            log::error!("Headline timer failed: {}", e);
        }
    }

    fn update_clock(document: &Document) {
        if let Some(el) = document.get_element_by_id("current-time") {
            el.set_inner_html(&clock::now().to_html());
        }
    }

    /// Mirror window manager state into the window elements and taskbar
    fn sync_dom(document: &Document, windows: &WindowManager) {
        if let Ok(list) = document.query_selector_all(".window") {
            for i in 0..list.length() {
                let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                    continue;
                };
                match windows.get(&el.id()) {
                    Some(record) if record.visible => {
                        let _ = el.class_list().remove_1("hidden");
                        let css = record.css_box();
                        let style = el.style();
                        let _ = style.set_property("left", &css.left);
                        let _ = style.set_property("top", &css.top);
                        let _ = style.set_property("width", &css.width);
                        let _ = style.set_property("height", &css.height);
                        let _ = style.set_property("z-index", &record.z_index.to_string());
                    }
                    _ => {
                        let _ = el.class_list().add_1("hidden");
                    }
                }
            }
        }

        let Some(bar) = document.query_selector(".taskbar-apps").ok().flatten() else {
            return;
        };
        bar.set_inner_html("");
        for entry in windows.taskbar() {
            let Ok(button) = document.create_element("div") else {
                continue;
            };
            let class = if entry.active {
                "taskbar-app active"
            } else {
                "taskbar-app"
            };
            button.set_class_name(class);
            let _ = button.set_attribute("data-window", &entry.window_id);
            button.set_text_content(Some(&entry.label));
            let _ = bar.append_child(&button);
        }
    }

    /// Update only the dragged window's offsets
    fn place_window(document: &Document, record: &WindowRecord) {
        let Some(el) = document
            .get_element_by_id(&record.id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let css = record.css_box();
        let style = el.style();
        let _ = style.set_property("left", &css.left);
        let _ = style.set_property("top", &css.top);
    }

    fn event_element(event: &Event) -> Option<Element> {
        event.target().and_then(|t| t.dyn_into::<Element>().ok())
    }

    fn closest(el: &Element, selector: &str) -> Option<Element> {
        el.closest(selector).ok().flatten()
    }

    /// Pointer position for mouse and touch events alike
    fn event_coords(event: &Event) -> Option<(f64, f64)> {
        if event.type_().starts_with("touch") {
            let touch = event.unchecked_ref::<TouchEvent>().touches().get(0)?;
            Some((touch.client_x() as f64, touch.client_y() as f64))
        } else {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some((mouse.client_x() as f64, mouse.client_y() as f64))
        }
    }

    fn listen(document: &Document, kind: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Touch listeners that may call `preventDefault`
    fn listen_active(document: &Document, kind: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    fn setup_icon_open(document: &Document, desktop: Shared) {
        let Ok(icons) = document.query_selector_all(".icon") else {
            return;
        };
        for i in 0..icons.length() {
            let Some(icon) = icons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let desktop = desktop.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(app) = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("data-app"))
                else {
                    return;
                };
                let mut d = desktop.borrow_mut();
                d.open_app(&doc, &app);
                sync_dom(&doc, &d.windows);
            });
            let _ = icon.add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_controls(document: &Document, desktop: Shared) {
        let doc = document.clone();
        listen(document, "click", move |event| {
            let Some(target) = event_element(&event) else { return };
            let classes = target.class_list();
            let mut d = desktop.borrow_mut();

            if classes.contains("taskbar-app") {
                if let Some(id) = target.get_attribute("data-window") {
                    if let Err(e) = d.windows.restore(&id) {
                        log::debug!("Taskbar click ignored: {}", e);
                    }
                }
            } else if let Some(win) = closest(&target, ".window") {
                let id = win.id();
                if classes.contains("close") {
                    d.windows.close(&id);
                } else if classes.contains("minimize") {
                    if let Err(e) = d.windows.minimize(&id) {
                        log::debug!("Minimize ignored: {}", e);
                    }
                } else if classes.contains("maximize") {
                    if let Err(e) = d.windows.toggle_maximize(&id) {
                        log::debug!("Maximize ignored: {}", e);
                    }
                } else {
                    return;
                }
            } else {
                return;
            }
            sync_dom(&doc, &d.windows);
        });
    }

    fn setup_window_dragging(document: &Document, desktop: Shared) {
        {
            let desktop = desktop.clone();
            let doc = document.clone();
            listen(document, "mousedown", move |event| {
                let Some(target) = event_element(&event) else { return };
                let classes = target.class_list();
                if !(classes.contains("window-header") || classes.contains("window-title")) {
                    return;
                }
                let Some(win) = closest(&target, ".window") else { return };
                let Some(pointer) = event_coords(&event) else { return };

                let mut d = desktop.borrow_mut();
                let id = win.id();
                let Some(record) = d.windows.get(&id) else { return };
                if record.maximized {
                    return;
                }
                let origin = (record.position.left as f64, record.position.top as f64);
                let _ = win.class_list().add_1("dragging");
                d.window_drag = Some((id.clone(), DragSession::new(pointer, origin)));
                d.windows.bring_to_front(&id);
                sync_dom(&doc, &d.windows);
            });
        }
        {
            let desktop = desktop.clone();
            let doc = document.clone();
            listen(document, "mousemove", move |event| {
                let mut d = desktop.borrow_mut();
                let Some((id, drag)) = d.window_drag.clone() else { return };
                let Some(pointer) = event_coords(&event) else { return };
                let (left, top) = drag.position_for(pointer);
                if let Ok(true) = d.windows.move_to(&id, Position::new(left as i32, top as i32)) {
                    if let Some(record) = d.windows.get(&id) {
                        place_window(&doc, record);
                    }
                }
            });
        }
        {
            let doc = document.clone();
            listen(document, "mouseup", move |_event| {
                let mut d = desktop.borrow_mut();
                if let Some((id, _)) = d.window_drag.take() {
                    if let Some(win) = doc.get_element_by_id(&id) {
                        let _ = win.class_list().remove_1("dragging");
                    }
                }
            });
        }
    }

    fn setup_icon_dragging(document: &Document, desktop: Shared) {
        let start_drag = {
            let desktop = desktop.clone();
            move |event: Event| {
                let Some(target) = event_element(&event) else { return };
                let Some(icon) = closest(&target, ".icon").and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };
                if desktop.borrow().icon_drag.is_some() {
                    return;
                }
                event.prevent_default();
                let Some(pointer) = event_coords(&event) else { return };

                // Hold briefly before dragging so clicks and taps still land
                let pending = desktop.clone();
                let timer = set_timeout(ICON_HOLD_MS, move || {
                    let style = icon.style();
                    let origin = (
                        parse_px(&style.get_property_value("left").unwrap_or_default()),
                        parse_px(&style.get_property_value("top").unwrap_or_default()),
                    );
                    let _ = icon.class_list().add_1("dragging");
                    let mut d = pending.borrow_mut();
                    d.icon_hold_timer = None;
                    d.icon_drag = Some((icon, DragSession::new(pointer, origin)));
                });
                match timer {
                    Ok(id) => desktop.borrow_mut().icon_hold_timer = Some(id),
                    Err(e) => log::warn!("Icon drag timer failed: {}", e),
                }
            }
        };

        let handle_drag = {
            let desktop = desktop.clone();
            move |event: Event| {
                let d = desktop.borrow();
                let Some((icon, drag)) = d.icon_drag.as_ref() else { return };
                event.prevent_default();
                let Some(pointer) = event_coords(&event) else { return };
                let Some(window) = web_sys::window() else { return };
                let viewport = (
                    window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                    window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                );
                let size = (icon.offset_width() as f64, icon.offset_height() as f64);
                let (left, top) = clamp_to_viewport(drag.position_for(pointer), size, viewport);
                let style = icon.style();
                let _ = style.set_property("left", &format!("{}px", left));
                let _ = style.set_property("top", &format!("{}px", top));
            }
        };

        let end_drag = {
            let desktop = desktop.clone();
            move |_event: Event| {
                let mut d = desktop.borrow_mut();
                if let Some(timer) = d.icon_hold_timer.take() {
                    clear_timeout(timer);
                }
                if let Some((icon, _)) = d.icon_drag.take() {
                    let _ = icon.class_list().remove_1("dragging");
                }
            }
        };

        listen(document, "mousedown", start_drag.clone());
        listen(document, "mousemove", handle_drag.clone());
        listen(document, "mouseup", end_drag.clone());

        listen_active(document, "touchstart", start_drag);
        listen_active(document, "touchmove", handle_drag);

        // Double tap opens the icon's window; dblclick is unreliable on touch
        {
            let desktop = desktop.clone();
            let doc = document.clone();
            listen(document, "touchend", move |event| {
                let Some(target) = event_element(&event) else { return };
                let Some(icon) = closest(&target, ".icon") else { return };
                let mut d = desktop.borrow_mut();
                if d.icon_drag.is_some() {
                    return;
                }
                if d.taps.register(now_ms()) {
                    if let Some(app) = icon.get_attribute("data-app") {
                        d.open_app(&doc, &app);
                        sync_dom(&doc, &d.windows);
                    }
                }
            });
        }
        listen(document, "touchend", end_drag.clone());
        listen(document, "touchcancel", end_drag);

        listen(document, "dragstart", |event| {
            if event_element(&event).and_then(|el| closest(&el, ".icon")).is_some() {
                event.prevent_default();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_desktop::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio desktop (native) starting...");
    log::info!("The desktop itself needs a browser - run with `trunk serve` for the web version");

    run_terminal_headline();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play each headline phrase once in the terminal at ~60 frames per second
#[cfg(not(target_arch = "wasm32"))]
fn run_terminal_headline() {
    use std::io::Write;
    use std::rc::Rc;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use futures::FutureExt;
    use portfolio_desktop::platform::headless::{ManualScheduler, MemorySurface};
    use portfolio_desktop::scramble::{TextScramble, seeded};
    use portfolio_desktop::{DesktopConfig, PhraseCycle};

    const FRAME: Duration = Duration::from_millis(16);

    let config = DesktopConfig::load();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let scheduler = Rc::new(ManualScheduler::new());
    let scramble = match TextScramble::with_config(
        MemorySurface::new(""),
        scheduler.clone(),
        seeded(seed),
        &config.scramble,
    ) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Cannot build scramble: {}", e);
            return;
        }
    };
    let mut phrases = match PhraseCycle::new(config.phrases.clone()) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Cannot cycle phrases: {}", e);
            return;
        }
    };

    let mut stdout = std::io::stdout();
    for _ in 0..phrases.len() {
        let mut done = scramble.set_text(phrases.next_phrase());
        loop {
            let text = scramble.with_surface(|s| s.text().to_string());
            let _ = write!(stdout, "\r\x1b[2K{}", text);
            let _ = stdout.flush();

            if let Some(result) = (&mut done).now_or_never() {
                if let Err(e) = result {
                    log::warn!("Headline interrupted: {}", e);
                }
                break;
            }
            std::thread::sleep(FRAME);
            scheduler.tick();
        }
        std::thread::sleep(Duration::from_millis(config.hold_ms as u64));
    }
    let _ = writeln!(stdout);
}
