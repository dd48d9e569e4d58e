//! Smooth scroll engine lifecycle
//!
//! [`SmoothScroller`] wires the capture hook, the exempt-surface classifier,
//! the motion engine, the frame timer and the dispatcher together.
//!
//! ```ignore
//! let scroller = SmoothScroller::new(config.scroll.clone(), platform::native())?;
//! scroller.install()?;
//! // ... later, e.g. after the config file changed
//! scroller.update_config(new_config.scroll.validated())?;
//! scroller.dispose();
//! ```

mod interceptor;
mod state;

use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::config::ScrollConfig;
use crate::error::{Error, Result};
use crate::platform::{MouseHook, WheelHandler, WindowSystem};
use crate::scroll::ScrollSession;
use crate::surface::{ClassNameHeuristic, SurfaceClassifier};

pub use interceptor::InputInterceptor;

use state::EngineCore;

/// Builder for [`SmoothScroller`] with replaceable collaborators
pub struct ScrollerBuilder {
    config: ScrollConfig,
    windows: Arc<dyn WindowSystem>,
    classifier: Option<Arc<dyn SurfaceClassifier>>,
    clock: Option<Arc<dyn Clock>>,
    runtime: Option<Handle>,
}

impl ScrollerBuilder {
    /// Replace the default class-name classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn SurfaceClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Run the frame timer on this runtime instead of the current one
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<SmoothScroller> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))?,
        };
        let classifier: Arc<dyn SurfaceClassifier> = match self.classifier {
            Some(classifier) => classifier,
            None => Arc::new(ClassNameHeuristic::new(self.windows.clone())),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(MonotonicClock),
        };

        let core = EngineCore::new(self.config, self.windows, classifier, clock, &runtime);
        Ok(SmoothScroller {
            interceptor: Arc::new(InputInterceptor::new(core.clone())),
            core,
            hook: Mutex::new(None),
        })
    }
}

/// System-wide smooth scrolling engine.
///
/// Safe to share across threads. Dropping it disposes it.
pub struct SmoothScroller {
    core: Arc<EngineCore>,
    interceptor: Arc<InputInterceptor>,
    hook: Mutex<Option<MouseHook>>,
}

impl SmoothScroller {
    pub fn builder(config: ScrollConfig, windows: Arc<dyn WindowSystem>) -> ScrollerBuilder {
        ScrollerBuilder {
            config,
            windows,
            classifier: None,
            clock: None,
            runtime: None,
        }
    }

    /// Create an engine on the current tokio runtime
    ///
    /// `config` is expected to be validated already.
    pub fn new(config: ScrollConfig, windows: Arc<dyn WindowSystem>) -> Result<Self> {
        Self::builder(config, windows).build()
    }

    /// Start capturing wheel events. No-op when already installed.
    pub fn install(&self) -> Result<()> {
        if self.core.is_disposed() {
            return Err(Error::Disposed);
        }
        let mut hook = self.hook.lock().unwrap_or_else(|e| e.into_inner());
        if hook.is_some() {
            debug!("Wheel hook already installed");
            return Ok(());
        }

        let handler: Arc<dyn WheelHandler> = self.interceptor.clone();
        *hook = Some(MouseHook::install(handler)?);
        info!("Smooth scrolling active");
        Ok(())
    }

    /// Stop capturing wheel events and drop any animation in flight
    pub fn uninstall(&self) -> Result<()> {
        if self.core.is_disposed() {
            return Err(Error::Disposed);
        }
        self.core.halt();
        self.remove_hook()
    }

    /// Replace the active configuration snapshot
    pub fn update_config(&self, config: ScrollConfig) -> Result<()> {
        if self.core.is_disposed() {
            return Err(Error::Disposed);
        }
        self.core.set_config(config);
        debug!("Scroll configuration updated");
        Ok(())
    }

    /// Tear everything down. Safe to call more than once.
    pub fn dispose(&self) {
        if !self.core.dispose() {
            return;
        }
        if let Err(e) = self.remove_hook() {
            warn!("Failed to remove wheel hook during dispose: {}", e);
        }
    }

    pub fn config(&self) -> ScrollConfig {
        self.core.config()
    }

    pub fn is_installed(&self) -> bool {
        self.hook.lock().map(|hook| hook.is_some()).unwrap_or(false)
    }

    pub fn is_disposed(&self) -> bool {
        self.core.is_disposed()
    }

    /// The running scroll animation, if any
    pub fn session(&self) -> Option<ScrollSession> {
        self.core.session()
    }

    /// Whether the frame timer is currently scheduled
    pub fn is_animating(&self) -> bool {
        self.core.is_ticking()
    }

    /// Handler the capture hook feeds; exposed for custom hook sources
    pub fn interceptor(&self) -> Arc<InputInterceptor> {
        self.interceptor.clone()
    }

    fn remove_hook(&self) -> Result<()> {
        let hook = self.hook.lock().unwrap_or_else(|e| e.into_inner()).take();
        match hook {
            Some(hook) => hook.uninstall(),
            None => Ok(()),
        }
    }
}

impl Drop for SmoothScroller {
    fn drop(&mut self) {
        self.dispose();
    }
}
