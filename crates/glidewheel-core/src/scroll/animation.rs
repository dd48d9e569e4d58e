//! L3 Molecular Layer: Motion engine
//!
//! Combines easing and timing to turn wheel notches into an animated scroll
//! session. Wheel input starts or merges a session; frame ticks advance it
//! and report how far the content should move since the previous frame.

use std::time::{Duration, Instant};

use crate::config::ScrollConfig;
use crate::types::WheelAxis;

use super::easing::ease;
use super::timing::{acceleration_factor, base_distance, is_complete, progress};

/// The in-flight animated scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSession {
    /// Signed distance (px) this animation travels in total
    pub target_distance: f64,
    /// Portion of `target_distance` already emitted
    pub scrolled_distance: f64,
    /// When the current animation (re)started
    pub animation_start: Instant,
    pub axis: WheelAxis,
}

impl ScrollSession {
    /// Eased position at `now`, relative to the animation start
    fn position(&self, now: Instant, config: &ScrollConfig) -> f64 {
        let t = progress(self.animation_start, now, config.animation_time());
        self.target_distance * ease(t, config.tail_to_head_ratio as f64)
    }
}

/// Result of feeding one wheel event to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputOutcome {
    /// Distance contributed by this event, acceleration included
    pub distance: f64,
    /// Acceleration multiplier that was applied
    pub acceleration: f64,
    /// True when the event started a session from idle
    pub started: bool,
}

/// Result of one frame tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// The session ended (or none was active); stop ticking
    Finished,
    /// The session is still running
    Advance {
        /// Eased position minus the distance emitted so far
        frame_distance: f64,
        /// Whether `frame_distance` cleared the threshold and was committed
        emitted: bool,
        axis: WheelAxis,
    },
}

/// Animated-scroll state machine: `Idle` when no session, `Animating` otherwise
#[derive(Debug, Clone, Default)]
pub struct MotionEngine {
    session: Option<ScrollSession>,
    last_input: Option<Instant>,
}

impl MotionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    pub fn session(&self) -> Option<&ScrollSession> {
        self.session.as_ref()
    }

    /// Feed a wheel event
    ///
    /// Starts a session when idle. While animating, the unfinished part of
    /// the current animation is carried into the new one if it points the
    /// same way; otherwise it is dropped and the new input starts fresh.
    /// Returns `None` for a zero delta, which leaves the state untouched.
    pub fn on_input(
        &mut self,
        delta: i16,
        axis: WheelAxis,
        now: Instant,
        config: &ScrollConfig,
    ) -> Option<InputOutcome> {
        if delta == 0 {
            return None;
        }

        let since_previous = self
            .last_input
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::MAX);
        self.last_input = Some(now);

        let acceleration = if self.session.is_some() {
            acceleration_factor(since_previous, config)
        } else {
            1.0
        };
        let distance = base_distance(delta, config) * acceleration;

        let started = match self.session.as_mut() {
            Some(session) => {
                let remaining = session.target_distance - session.position(now, config);
                let same_way = session.axis == axis && sign(remaining) == sign(distance);

                session.target_distance = if same_way {
                    remaining + distance
                } else {
                    distance
                };
                session.scrolled_distance = 0.0;
                session.animation_start = now;
                session.axis = axis;
                false
            }
            None => {
                self.session = Some(ScrollSession {
                    target_distance: distance,
                    scrolled_distance: 0.0,
                    animation_start: now,
                    axis,
                });
                true
            }
        };

        Some(InputOutcome {
            distance,
            acceleration,
            started,
        })
    }

    /// Advance the session by one frame
    pub fn tick(&mut self, now: Instant, config: &ScrollConfig) -> FrameStep {
        let Some(session) = self.session.as_mut() else {
            return FrameStep::Finished;
        };

        if session.target_distance.abs() < config.min_scroll_threshold
            || is_complete(session.animation_start, now, config.animation_time())
        {
            self.session = None;
            return FrameStep::Finished;
        }

        let position = session.position(now, config);
        let frame_distance = position - session.scrolled_distance;
        let emitted = frame_distance.abs() >= config.min_scroll_threshold;
        if emitted {
            session.scrolled_distance = position;
        }

        FrameStep::Advance {
            frame_distance,
            emitted,
            axis: session.axis,
        }
    }

    /// Drop any running session
    pub fn reset(&mut self) {
        self.session = None;
        self.last_input = None;
    }
}

/// Sign with zero counted as positive
#[inline]
fn sign(value: f64) -> i8 {
    if value >= 0.0 {
        1
    } else {
        -1
    }
}
