//! Frame scheduling: when animation frames run and how often

pub mod pacer;
pub mod timer;

pub use pacer::{FramePacer, DEFAULT_FRAME_INTERVAL_MS};
pub use timer::{FrameTimer, TimerState};
