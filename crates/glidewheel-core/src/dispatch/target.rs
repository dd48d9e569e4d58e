//! Window-under-cursor resolution with a short cache

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::trace;

use crate::clock::Clock;
use crate::platform::WindowSystem;
use crate::types::{ScreenPoint, WindowHandle};

/// How long a resolved cursor position and target window are reused
pub const TARGET_TTL: Duration = Duration::from_millis(50);

/// Where synthetic wheel events should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    pub point: ScreenPoint,
    pub window: WindowHandle,
}

#[derive(Debug, Clone, Copy)]
struct CachedTarget {
    target: ScrollTarget,
    resolved_at: Instant,
}

pub struct TargetResolver {
    windows: Arc<dyn WindowSystem>,
    clock: Arc<dyn Clock>,
    cache: Mutex<Option<CachedTarget>>,
}

impl TargetResolver {
    pub fn new(windows: Arc<dyn WindowSystem>, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows,
            clock,
            cache: Mutex::new(None),
        }
    }

    /// Cursor position and the window beneath it.
    ///
    /// Returns `None` when the cursor cannot be read or nothing is under it.
    pub fn resolve(&self) -> Option<ScrollTarget> {
        let now = self.clock.now();
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = *cache {
            if now.saturating_duration_since(cached.resolved_at) < TARGET_TTL {
                return Some(cached.target);
            }
        }

        let point = match self.windows.cursor_position() {
            Ok(point) => point,
            Err(e) => {
                trace!("Cursor position unavailable: {}", e);
                return None;
            }
        };
        let window = self
            .windows
            .window_from_point(point)
            .filter(|window| !window.is_null())?;

        let target = ScrollTarget { point, window };
        *cache = Some(CachedTarget {
            target,
            resolved_at: now,
        });
        Some(target)
    }

    /// Forget the cached target so the next frame queries afresh
    pub fn invalidate(&self) {
        *self.cache.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::platform::fake::FakeWindowSystem;

    fn resolver() -> (Arc<FakeWindowSystem>, Arc<ManualClock>, TargetResolver) {
        let fake = Arc::new(FakeWindowSystem::with_app_window());
        let clock = Arc::new(ManualClock::new());
        let resolver = TargetResolver::new(fake.clone(), clock.clone());
        (fake, clock, resolver)
    }

    #[test]
    fn test_resolve_reuses_cache_within_ttl() {
        let (fake, clock, resolver) = resolver();
        let first = resolver.resolve().unwrap();
        assert_eq!(first.window, WindowHandle(2));
        assert_eq!(first.point, ScreenPoint::new(400, 300));

        clock.advance_ms(30);
        fake.set_cursor(Some(ScreenPoint::new(10, 10)), Some(WindowHandle(3)));
        assert_eq!(resolver.resolve(), Some(first));
        assert_eq!(fake.cursor_queries(), 1);

        clock.advance_ms(30);
        let refreshed = resolver.resolve().unwrap();
        assert_eq!(refreshed.window, WindowHandle(3));
        assert_eq!(fake.cursor_queries(), 2);
    }

    #[test]
    fn test_cursor_failure_aborts() {
        let (fake, _clock, resolver) = resolver();
        fake.set_cursor(None, Some(WindowHandle(2)));
        assert_eq!(resolver.resolve(), None);
    }

    #[test]
    fn test_no_window_under_cursor() {
        let (fake, _clock, resolver) = resolver();
        fake.set_cursor(Some(ScreenPoint::new(1, 1)), None);
        assert_eq!(resolver.resolve(), None);

        fake.set_cursor(Some(ScreenPoint::new(1, 1)), Some(WindowHandle(0)));
        assert_eq!(resolver.resolve(), None);
    }

    #[test]
    fn test_invalidate_forces_query() {
        let (fake, _clock, resolver) = resolver();
        resolver.resolve();
        resolver.invalidate();
        resolver.resolve();
        assert_eq!(fake.cursor_queries(), 2);
    }
}
