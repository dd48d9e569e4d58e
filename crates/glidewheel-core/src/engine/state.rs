//! Shared engine state driven by the hook thread and the frame timer

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::config::ScrollConfig;
use crate::dispatch::EventDispatcher;
use crate::platform::WindowSystem;
use crate::scheduler::{FramePacer, FrameTimer};
use crate::scroll::{FrameStep, MotionEngine, ScrollSession};
use crate::surface::{ForegroundClassifier, SurfaceClassifier};
use crate::types::{WheelAxis, WheelVerdict};

/// Everything mutated per input or per frame. Held only for arithmetic.
struct EngineState {
    config: ScrollConfig,
    motion: MotionEngine,
    pacer: FramePacer,
}

pub(crate) struct EngineCore {
    state: Mutex<EngineState>,
    classifier: ForegroundClassifier,
    dispatcher: EventDispatcher,
    timer: FrameTimer,
    clock: Arc<dyn Clock>,
    disposed: AtomicBool,
}

impl EngineCore {
    pub(crate) fn new(
        config: ScrollConfig,
        windows: Arc<dyn WindowSystem>,
        classifier: Arc<dyn SurfaceClassifier>,
        clock: Arc<dyn Clock>,
        runtime: &Handle,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<EngineCore>| {
            let weak = weak.clone();
            let timer = FrameTimer::spawn(runtime, move || {
                if let Some(core) = weak.upgrade() {
                    core.on_frame();
                }
            });

            Self {
                state: Mutex::new(EngineState {
                    config,
                    motion: MotionEngine::new(),
                    pacer: FramePacer::new(),
                }),
                classifier: ForegroundClassifier::new(windows.clone(), classifier, clock.clone()),
                dispatcher: EventDispatcher::new(windows, clock.clone()),
                timer,
                clock,
                disposed: AtomicBool::new(false),
            }
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[inline]
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub(crate) fn is_exempt_foreground(&self) -> bool {
        self.classifier.is_exempt_foreground()
    }

    /// Feed a wheel event to the motion engine and start frames.
    ///
    /// The timer is armed while the state lock is held so a concurrent
    /// final frame cannot disarm it after this input was merged.
    pub(crate) fn accept_input(&self, delta: i16, axis: WheelAxis) -> WheelVerdict {
        let now = self.clock.now();
        let mut guard = self.lock_state();
        if self.is_disposed() {
            return WheelVerdict::PassThrough;
        }

        let EngineState { config, motion, pacer } = &mut *guard;
        if !config.enable_smooth_scroll {
            return WheelVerdict::PassThrough;
        }
        let Some(outcome) = motion.on_input(delta, axis, now, config) else {
            return WheelVerdict::PassThrough;
        };

        let interval = pacer.on_input(outcome.distance, config);
        self.timer.arm(interval);

        trace!(
            "Wheel {} ({:?}): distance {:.1}, acceleration {:.2}, interval {:?}",
            delta,
            axis,
            outcome.distance,
            outcome.acceleration,
            interval
        );
        WheelVerdict::Consume
    }

    /// One timer tick: advance the animation, then post the frame unlocked
    fn on_frame(&self) {
        if self.is_disposed() {
            return;
        }
        let now = self.clock.now();

        let (frame_distance, step_size, axis) = {
            let mut guard = self.lock_state();
            if self.is_disposed() {
                return;
            }
            let EngineState { config, motion, pacer } = &mut *guard;

            match motion.tick(now, config) {
                FrameStep::Finished => {
                    self.timer.disarm();
                    trace!("Scroll animation finished");
                    return;
                }
                FrameStep::Advance {
                    frame_distance,
                    emitted,
                    axis,
                } => {
                    if let Some(interval) = pacer.on_frame(frame_distance, now, config) {
                        self.timer.rearm(interval);
                    }
                    if !emitted {
                        return;
                    }
                    (frame_distance, config.step_size_px(), axis)
                }
            }
        };

        self.dispatcher.dispatch(frame_distance, step_size, axis);
    }

    pub(crate) fn config(&self) -> ScrollConfig {
        self.lock_state().config.clone()
    }

    pub(crate) fn set_config(&self, config: ScrollConfig) {
        let mut state = self.lock_state();
        if !config.enable_smooth_scroll && state.motion.is_active() {
            state.motion.reset();
            self.timer.disarm();
        }
        state.config = config;
    }

    pub(crate) fn session(&self) -> Option<ScrollSession> {
        self.lock_state().motion.session().copied()
    }

    pub(crate) fn is_ticking(&self) -> bool {
        self.timer.is_armed()
    }

    /// Stop any animation in flight
    pub(crate) fn halt(&self) {
        let mut state = self.lock_state();
        state.motion.reset();
        self.timer.disarm();
    }

    /// Returns false if already disposed
    pub(crate) fn dispose(&self) -> bool {
        {
            let mut state = self.lock_state();
            if self.disposed.swap(true, Ordering::AcqRel) {
                return false;
            }
            state.motion.reset();
            self.timer.disarm();
            self.timer.shutdown();
            self.dispatcher.dispose();
        }
        debug!("Scroll engine disposed");
        true
    }
}
