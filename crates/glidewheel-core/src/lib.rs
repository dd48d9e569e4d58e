pub mod clock;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod platform;
pub mod scheduler;
pub mod scroll;
pub mod surface;
pub mod types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{AppConfig, GeneralConfig, ScrollConfig};
pub use engine::{InputInterceptor, ScrollerBuilder, SmoothScroller};
pub use error::{Error, Result};
pub use platform::{WheelHandler, WindowSystem};
pub use surface::{ClassNameHeuristic, SurfaceClassifier, SurfaceKind};
pub use types::{ScreenPoint, WheelAxis, WheelMessage, WheelVerdict, WindowHandle};
