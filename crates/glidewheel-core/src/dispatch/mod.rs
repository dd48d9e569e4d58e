//! Outbound side: where and how animation frames are delivered

pub mod dispatcher;
pub mod target;

pub use dispatcher::{wheel_delta, EventDispatcher};
pub use target::{ScrollTarget, TargetResolver, TARGET_TTL};
