//! Scriptable window system for tests

use std::collections::HashMap;
use std::sync::Mutex;

use super::WindowSystem;
use crate::types::{ScreenPoint, WheelMessage, WindowHandle};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct FakeState {
    foreground: Option<WindowHandle>,
    class_names: HashMap<WindowHandle, String>,
    cursor: Option<ScreenPoint>,
    window_under_cursor: Option<WindowHandle>,
    fail_post: bool,
    posted: Vec<(WindowHandle, WheelMessage)>,
    foreground_queries: usize,
    class_name_queries: usize,
    cursor_queries: usize,
}

#[derive(Debug, Default)]
pub(crate) struct FakeWindowSystem {
    state: Mutex<FakeState>,
}

impl FakeWindowSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Foreground window `1` with a plain application class, cursor over window `2`
    pub fn with_app_window() -> Self {
        let fake = Self::new();
        fake.set_foreground(Some(WindowHandle(1)), "Notepad");
        fake.set_cursor(Some(ScreenPoint::new(400, 300)), Some(WindowHandle(2)));
        fake
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn set_foreground(&self, window: Option<WindowHandle>, class_name: &str) {
        let mut state = self.state();
        state.foreground = window;
        if let Some(window) = window {
            state.class_names.insert(window, class_name.to_string());
        }
    }

    pub fn set_cursor(&self, cursor: Option<ScreenPoint>, window: Option<WindowHandle>) {
        let mut state = self.state();
        state.cursor = cursor;
        state.window_under_cursor = window;
    }

    pub fn set_fail_post(&self, fail: bool) {
        self.state().fail_post = fail;
    }

    pub fn posted(&self) -> Vec<(WindowHandle, WheelMessage)> {
        self.state().posted.clone()
    }

    pub fn posted_delta_sum(&self) -> i64 {
        self.state().posted.iter().map(|(_, m)| m.delta as i64).sum()
    }

    pub fn foreground_queries(&self) -> usize {
        self.state().foreground_queries
    }

    pub fn class_name_queries(&self) -> usize {
        self.state().class_name_queries
    }

    pub fn cursor_queries(&self) -> usize {
        self.state().cursor_queries
    }
}

impl WindowSystem for FakeWindowSystem {
    fn foreground_window(&self) -> Option<WindowHandle> {
        let mut state = self.state();
        state.foreground_queries += 1;
        state.foreground
    }

    fn class_name(&self, window: WindowHandle) -> Result<String> {
        let mut state = self.state();
        state.class_name_queries += 1;
        state
            .class_names
            .get(&window)
            .cloned()
            .ok_or_else(|| Error::Platform("no such window".to_string()))
    }

    fn cursor_position(&self) -> Result<ScreenPoint> {
        let mut state = self.state();
        state.cursor_queries += 1;
        state
            .cursor
            .ok_or_else(|| Error::Platform("cursor unavailable".to_string()))
    }

    fn window_from_point(&self, _point: ScreenPoint) -> Option<WindowHandle> {
        self.state().window_under_cursor
    }

    fn post_wheel(&self, target: WindowHandle, message: WheelMessage) -> Result<()> {
        let mut state = self.state();
        if state.fail_post {
            return Err(Error::Platform("post failed".to_string()));
        }
        state.posted.push((target, message));
        Ok(())
    }
}
