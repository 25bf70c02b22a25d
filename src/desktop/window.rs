//! Window manager state
//!
//! Tracks which app windows are open, where they sit, their stacking order
//! and the matching taskbar buttons. The DOM layer reads this state back
//! after every change; nothing here touches the browser.

use crate::consts::{
    CASCADE_STEP_PX, FIRST_WINDOW_LEFT_PX, FIRST_WINDOW_TOP_PX, TASKBAR_HEIGHT_PX, Z_INDEX_BASE,
};
use crate::error::{DesktopError, DesktopResult};

/// Top-left corner in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub left: i32,
    pub top: i32,
}

impl Position {
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }
}

/// Where a restored window goes when it never had a remembered position
pub const DEFAULT_RESTORE_POSITION: Position =
    Position::new(FIRST_WINDOW_LEFT_PX, FIRST_WINDOW_TOP_PX);

/// Inline style values for a window element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssBox {
    pub left: String,
    pub top: String,
    /// Empty string clears the inline value
    pub width: String,
    pub height: String,
}

/// Window id for an app, matching the DOM element id
pub fn window_id(app: &str) -> String {
    format!("{}-window", app)
}

/// One open (possibly minimized) window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: String,
    pub app: String,
    pub visible: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub position: Position,
    /// Position to return to when un-maximizing
    pub restore_position: Option<Position>,
    pub z_index: u32,
}

impl WindowRecord {
    pub fn css_box(&self) -> CssBox {
        if self.maximized {
            CssBox {
                left: "0px".to_string(),
                top: "0px".to_string(),
                width: "100vw".to_string(),
                height: format!("calc(100vh - {}px)", TASKBAR_HEIGHT_PX),
            }
        } else {
            CssBox {
                left: format!("{}px", self.position.left),
                top: format!("{}px", self.position.top),
                width: String::new(),
                height: String::new(),
            }
        }
    }
}

/// Taskbar button for an open window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub window_id: String,
    pub label: String,
    pub active: bool,
}

/// Taskbar text for an app: first `-` becomes a space, words are capitalized
pub fn taskbar_label(app: &str) -> String {
    let spaced = app.replacen('-', " ", 1);
    let mut out = String::with_capacity(spaced.len());
    let mut in_word = false;
    for c in spaced.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }
    out
}

/// Open windows, stacking order and taskbar
#[derive(Debug, Clone)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    taskbar: Vec<TaskbarEntry>,
    top_z: u32,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            taskbar: Vec::new(),
            top_z: Z_INDEX_BASE,
        }
    }

    /// Open an app window, or focus it if it is already showing
    ///
    /// Newly shown windows cascade from (100, 50) by 30px per other visible
    /// window.
    pub fn open(&mut self, app: &str) -> &WindowRecord {
        let id = window_id(app);

        let existing = self.windows.iter().position(|w| w.id == id);
        if let Some(idx) = existing.filter(|&i| self.windows[i].visible) {
            self.bring_to_front(&id);
            log::debug!("{} already open, focused", id);
            return &self.windows[idx];
        }

        let others_visible = self
            .windows
            .iter()
            .filter(|w| w.visible && w.id != id)
            .count() as i32;
        let offset = others_visible * CASCADE_STEP_PX;
        let record = WindowRecord {
            id: id.clone(),
            app: app.to_string(),
            visible: true,
            minimized: false,
            maximized: false,
            position: Position::new(FIRST_WINDOW_LEFT_PX + offset, FIRST_WINDOW_TOP_PX + offset),
            restore_position: None,
            z_index: self.top_z,
        };

        let idx = match existing {
            Some(i) => {
                self.windows[i] = record;
                i
            }
            None => {
                self.windows.push(record);
                self.windows.len() - 1
            }
        };

        if !self.taskbar.iter().any(|t| t.window_id == id) {
            self.taskbar.push(TaskbarEntry {
                window_id: id.clone(),
                label: taskbar_label(app),
                active: true,
            });
        }
        self.bring_to_front(&id);

        log::info!("Opened {}", id);
        &self.windows[idx]
    }

    /// Hide a window and drop its record and taskbar button
    pub fn close(&mut self, id: &str) -> Option<WindowRecord> {
        self.taskbar.retain(|t| t.window_id != id);
        let idx = self.windows.iter().position(|w| w.id == id)?;
        log::info!("Closed {}", id);
        Some(self.windows.remove(idx))
    }

    /// Hide a window but keep it on the taskbar
    pub fn minimize(&mut self, id: &str) -> DesktopResult<()> {
        let record = self.get_mut(id)?;
        record.visible = false;
        record.minimized = true;
        if let Some(entry) = self.taskbar.iter_mut().find(|t| t.window_id == id) {
            entry.active = false;
        }
        Ok(())
    }

    /// Flip between maximized and the remembered position; returns the new state
    pub fn toggle_maximize(&mut self, id: &str) -> DesktopResult<bool> {
        let record = self.get_mut(id)?;
        if record.maximized {
            record.position = record
                .restore_position
                .take()
                .unwrap_or(DEFAULT_RESTORE_POSITION);
            record.maximized = false;
        } else {
            record.restore_position = Some(record.position);
            record.maximized = true;
        }
        Ok(record.maximized)
    }

    /// Show a minimized window again (taskbar click)
    pub fn restore(&mut self, id: &str) -> DesktopResult<()> {
        let record = self.get_mut(id)?;
        record.visible = true;
        record.minimized = false;
        self.bring_to_front(id);
        Ok(())
    }

    /// Raise a window above every other and make its taskbar button the only active one
    pub fn bring_to_front(&mut self, id: &str) -> u32 {
        self.top_z += 1;
        let z = self.top_z;
        if let Some(record) = self.windows.iter_mut().find(|w| w.id == id) {
            record.z_index = z;
        }
        for entry in &mut self.taskbar {
            entry.active = entry.window_id == id;
        }
        z
    }

    /// Move a window (dragging); maximized windows stay put and return `false`
    pub fn move_to(&mut self, id: &str, position: Position) -> DesktopResult<bool> {
        let record = self.get_mut(id)?;
        if record.maximized {
            return Ok(false);
        }
        record.position = position;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> DesktopResult<&mut WindowRecord> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| DesktopError::WindowNotFound(id.to_string()))
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn taskbar(&self) -> &[TaskbarEntry] {
        &self.taskbar
    }

    /// Whether the element with this id should be shown
    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(|w| w.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.windows.iter().filter(|w| w.visible).count()
    }

    /// Highest z-index handed out so far
    pub fn top_z(&self) -> u32 {
        self.top_z
    }
}
