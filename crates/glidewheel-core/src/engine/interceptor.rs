//! Entry point for captured wheel events

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::error;

use super::state::EngineCore;
use crate::platform::WheelHandler;
use crate::types::{WheelAxis, WheelVerdict};

/// Decides, per captured wheel event, whether to animate it or let it through.
///
/// Runs on the hook thread. Any panic below this point is caught and the
/// event passes through untouched.
pub struct InputInterceptor {
    core: Arc<EngineCore>,
}

impl InputInterceptor {
    pub(crate) fn new(core: Arc<EngineCore>) -> Self {
        Self { core }
    }

    fn intercept(&self, delta: i16, axis: WheelAxis) -> WheelVerdict {
        if self.core.is_disposed() {
            return WheelVerdict::PassThrough;
        }
        if self.core.is_exempt_foreground() {
            return WheelVerdict::PassThrough;
        }
        self.core.accept_input(delta, axis)
    }
}

impl WheelHandler for InputInterceptor {
    fn on_wheel_event(&self, delta: i16, axis: WheelAxis) -> WheelVerdict {
        match catch_unwind(AssertUnwindSafe(|| self.intercept(delta, axis))) {
            Ok(verdict) => verdict,
            Err(_) => {
                error!("Wheel interception panicked; passing event through");
                WheelVerdict::PassThrough
            }
        }
    }
}
