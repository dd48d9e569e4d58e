//! Smooth scrolling motion model
//!
//! Turns discrete wheel notches into a time-based animated scroll.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Two-phase ease-in/ease-out curve
//! - `timing` - Progress, base distance and acceleration calculations
//!
//! ## L3 Molecular Layer
//! - `animation` - Motion engine combining atoms into a scroll session
//!
//! # Usage
//!
//! ```ignore
//! use glidewheel_core::scroll::{FrameStep, MotionEngine};
//!
//! let mut engine = MotionEngine::new();
//! engine.on_input(120, WheelAxis::Vertical, clock.now(), &config);
//!
//! // On every frame tick
//! match engine.tick(clock.now(), &config) {
//!     FrameStep::Advance { frame_distance, emitted: true, .. } => dispatch(frame_distance),
//!     FrameStep::Advance { .. } => {}
//!     FrameStep::Finished => timer.disarm(),
//! }
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

// Re-exports for convenient access
pub use animation::{FrameStep, InputOutcome, MotionEngine, ScrollSession};
pub use easing::ease;
