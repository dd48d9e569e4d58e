//! Cached foreground classification for the capture callback

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::trace;

use super::{SurfaceClassifier, SurfaceKind};
use crate::clock::Clock;
use crate::platform::WindowSystem;
use crate::types::WindowHandle;

/// How long the last foreground verdict is reused without a map lookup
pub const FOREGROUND_TTL: Duration = Duration::from_millis(100);

/// Per-handle verdict map is cleared once it holds this many entries
pub const MAX_CACHED_VERDICTS: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct LastForeground {
    window: WindowHandle,
    kind: SurfaceKind,
    checked_at: Instant,
}

/// Answers "is the foreground window exempt?" from the hook thread.
///
/// Both caches are taken with `try_lock`; when another context holds one the
/// window is classified uncached rather than waiting.
pub struct ForegroundClassifier {
    windows: Arc<dyn WindowSystem>,
    classifier: Arc<dyn SurfaceClassifier>,
    clock: Arc<dyn Clock>,
    last: Mutex<Option<LastForeground>>,
    verdicts: Mutex<HashMap<WindowHandle, SurfaceKind>>,
}

impl ForegroundClassifier {
    pub fn new(
        windows: Arc<dyn WindowSystem>,
        classifier: Arc<dyn SurfaceClassifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            windows,
            classifier,
            clock,
            last: Mutex::new(None),
            verdicts: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_exempt_foreground(&self) -> bool {
        let window = match self.windows.foreground_window() {
            Some(window) if !window.is_null() => window,
            _ => return false,
        };
        let now = self.clock.now();

        if let Ok(last) = self.last.try_lock() {
            if let Some(last) = *last {
                if last.window == window && now.saturating_duration_since(last.checked_at) < FOREGROUND_TTL {
                    return last.kind.is_exempt();
                }
            }
        }

        let kind = self.lookup(window);
        if let Ok(mut last) = self.last.try_lock() {
            *last = Some(LastForeground {
                window,
                kind,
                checked_at: now,
            });
        }
        kind.is_exempt()
    }

    /// Number of per-handle verdicts currently cached
    pub fn cached_verdicts(&self) -> usize {
        self.verdicts.lock().map(|v| v.len()).unwrap_or(0)
    }

    fn lookup(&self, window: WindowHandle) -> SurfaceKind {
        if let Ok(verdicts) = self.verdicts.try_lock() {
            if let Some(kind) = verdicts.get(&window) {
                return *kind;
            }
        }

        let kind = self.classifier.classify(window);
        trace!("Classified {:?} as {:?}", window, kind);

        if let Ok(mut verdicts) = self.verdicts.try_lock() {
            if verdicts.len() >= MAX_CACHED_VERDICTS {
                verdicts.clear();
            }
            verdicts.insert(window, kind);
        }
        kind
    }
}
