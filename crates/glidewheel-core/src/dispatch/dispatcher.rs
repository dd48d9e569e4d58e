//! Turns animation frames into synthetic wheel messages

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use super::target::TargetResolver;
use crate::clock::Clock;
use crate::platform::WindowSystem;
use crate::types::{WheelAxis, WheelMessage, WHEEL_DELTA};

/// Wheel delta (120 per notch) carrying `frame_distance` pixels.
///
/// Rounded to the nearest unit and saturated to the `i16` range.
pub fn wheel_delta(frame_distance: f64, step_size: f64) -> i16 {
    if step_size <= 0.0 || !frame_distance.is_finite() {
        return 0;
    }
    let delta = (frame_distance * WHEEL_DELTA / step_size).round();
    delta.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Posts frame distances to the window under the cursor
pub struct EventDispatcher {
    windows: Arc<dyn WindowSystem>,
    resolver: TargetResolver,
    disposed: AtomicBool,
}

impl EventDispatcher {
    pub fn new(windows: Arc<dyn WindowSystem>, clock: Arc<dyn Clock>) -> Self {
        Self {
            resolver: TargetResolver::new(windows.clone(), clock),
            windows,
            disposed: AtomicBool::new(false),
        }
    }

    /// Post one frame. Returns whether a message was queued.
    ///
    /// Failures are swallowed; a failed post drops the cached target.
    pub fn dispatch(&self, frame_distance: f64, step_size: f64, axis: WheelAxis) -> bool {
        if frame_distance == 0.0 || self.disposed.load(Ordering::Acquire) {
            return false;
        }

        let delta = wheel_delta(frame_distance, step_size);
        if delta == 0 {
            return false;
        }

        let Some(target) = self.resolver.resolve() else {
            return false;
        };

        let message = WheelMessage {
            axis,
            delta,
            point: target.point,
        };
        match self.windows.post_wheel(target.window, message) {
            Ok(()) => {
                trace!("Posted {:?} delta {} to {:?}", axis, delta, target.window);
                true
            }
            Err(e) => {
                debug!("Wheel post to {:?} failed: {}", target.window, e);
                self.resolver.invalidate();
                false
            }
        }
    }

    /// Stop posting; later `dispatch` calls are no-ops
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
        self.resolver.invalidate();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
