//! Operating system seam
//!
//! [`WindowSystem`] covers the handful of window queries and the message post
//! the engine needs. [`MouseHook`] owns the system-wide wheel registration.
//! Windows gets the real implementation; other targets build against a
//! headless stand-in so the engine and its tests stay portable.

use std::sync::Arc;

use crate::types::{ScreenPoint, WheelAxis, WheelMessage, WheelVerdict, WindowHandle};
use crate::Result;

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub use self::win32::{MouseHook, Win32WindowSystem as NativeWindowSystem};

#[cfg(not(windows))]
mod headless;
#[cfg(not(windows))]
pub use self::headless::{HeadlessWindowSystem as NativeWindowSystem, MouseHook};

#[cfg(test)]
pub(crate) mod fake;

/// Window queries and message posting used by the engine
pub trait WindowSystem: Send + Sync {
    /// Window that currently has keyboard focus, if any
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Registered class name of a window
    fn class_name(&self, window: WindowHandle) -> Result<String>;

    /// Current cursor position in screen coordinates
    fn cursor_position(&self) -> Result<ScreenPoint>;

    /// Window directly beneath a screen point
    fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle>;

    /// Queue a wheel message on the target window without waiting for it
    fn post_wheel(&self, target: WindowHandle, message: WheelMessage) -> Result<()>;
}

/// Receiver of raw wheel events from the capture hook.
///
/// Called on the hook thread under the OS callback deadline.
pub trait WheelHandler: Send + Sync {
    fn on_wheel_event(&self, delta: i16, axis: WheelAxis) -> WheelVerdict;
}

/// Window system for the current platform
pub fn native() -> Arc<dyn WindowSystem> {
    Arc::new(NativeWindowSystem)
}
