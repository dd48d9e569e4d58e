//! Stand-in for targets without a global wheel hook

use std::sync::Arc;

use super::{WheelHandler, WindowSystem};
use crate::types::{ScreenPoint, WheelMessage, WindowHandle};
use crate::{Error, Result};

/// Window system that reports no windows and refuses to post
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessWindowSystem;

impl WindowSystem for HeadlessWindowSystem {
    fn foreground_window(&self) -> Option<WindowHandle> {
        None
    }

    fn class_name(&self, _window: WindowHandle) -> Result<String> {
        Err(Error::Unsupported)
    }

    fn cursor_position(&self) -> Result<ScreenPoint> {
        Err(Error::Unsupported)
    }

    fn window_from_point(&self, _point: ScreenPoint) -> Option<WindowHandle> {
        None
    }

    fn post_wheel(&self, _target: WindowHandle, _message: WheelMessage) -> Result<()> {
        Err(Error::Unsupported)
    }
}

/// Placeholder hook; installation always fails with [`Error::Unsupported`]
pub struct MouseHook {
    _private: (),
}

impl MouseHook {
    pub fn install(_handler: Arc<dyn WheelHandler>) -> Result<Self> {
        Err(Error::Unsupported)
    }

    pub fn uninstall(self) -> Result<()> {
        Ok(())
    }
}
