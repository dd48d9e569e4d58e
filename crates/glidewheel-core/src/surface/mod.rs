//! Exempt-surface classification
//!
//! Some system surfaces (shell, input method editors, UWP frames) must see
//! the raw wheel events. The classifier decides which foreground windows
//! those are; [`ForegroundClassifier`] keeps the answer off the hot path.

mod cache;

use std::sync::Arc;

use tracing::debug;

use crate::platform::WindowSystem;
use crate::types::WindowHandle;

pub use cache::{ForegroundClassifier, FOREGROUND_TTL, MAX_CACHED_VERDICTS};

/// Category of a top-level window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Receives native wheel events untouched
    Exempt,
    /// Gets smooth scrolling
    Normal,
}

impl SurfaceKind {
    #[inline]
    pub fn is_exempt(self) -> bool {
        self == SurfaceKind::Exempt
    }
}

/// Pluggable window classification
pub trait SurfaceClassifier: Send + Sync {
    fn classify(&self, window: WindowHandle) -> SurfaceKind;
}

/// Class name fragments of shell and system surfaces
const EXEMPT_CLASS_FRAGMENTS: &[&str] = &[
    "ApplicationFrame",
    "Windows.UI.Core",
    "Windows.UI.Input",
    "Shell_",
    "IME",
    "SystemSettings",
    "ControlPanel",
];

/// Whether a window class name belongs to an exempt system surface
pub fn is_exempt_class_name(class_name: &str) -> bool {
    class_name.starts_with('#')
        || class_name.starts_with("Windows.")
        || EXEMPT_CLASS_FRAGMENTS
            .iter()
            .any(|fragment| class_name.contains(fragment))
}

/// Default classifier: matches the window class name against known system
/// surfaces. Lookup failures classify as [`SurfaceKind::Normal`].
pub struct ClassNameHeuristic {
    windows: Arc<dyn WindowSystem>,
}

impl ClassNameHeuristic {
    pub fn new(windows: Arc<dyn WindowSystem>) -> Self {
        Self { windows }
    }
}

impl SurfaceClassifier for ClassNameHeuristic {
    fn classify(&self, window: WindowHandle) -> SurfaceKind {
        match self.windows.class_name(window) {
            Ok(name) if is_exempt_class_name(&name) => SurfaceKind::Exempt,
            Ok(_) => SurfaceKind::Normal,
            Err(e) => {
                debug!("Class name lookup failed for {:?}: {}", window, e);
                SurfaceKind::Normal
            }
        }
    }
}
