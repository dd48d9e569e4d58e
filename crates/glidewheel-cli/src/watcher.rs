//! Config file hot reload

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use glidewheel_core::{AppConfig, ScrollConfig, SmoothScroller};

/// Polls the config file and reports changed scroll settings.
///
/// Only the `[scroll]` section is applied live; `[general]` changes take
/// effect on the next start.
pub struct ConfigWatcher {
    path: PathBuf,
    interval: Duration,
    last_content: Option<String>,
    current: ScrollConfig,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf, config: &AppConfig) -> Self {
        let last_content = std::fs::read_to_string(&path).ok();
        Self {
            path,
            interval: config.watch_interval(),
            last_content,
            current: config.scroll.clone(),
        }
    }

    /// Check the file once. Returns the new validated snapshot when the
    /// scroll settings changed.
    pub fn poll(&mut self) -> Option<ScrollConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Config file unreadable: {}", e);
                return None;
            }
        };
        if self.last_content.as_deref() == Some(content.as_str()) {
            return None;
        }

        let parsed = AppConfig::from_toml(&content);
        self.last_content = Some(content);

        match parsed {
            Ok(config) if config.scroll != self.current => {
                self.current = config.scroll.clone();
                Some(config.scroll)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring invalid config file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Apply config changes to `scroller` until shutdown
    pub async fn run(mut self, scroller: Arc<SmoothScroller>, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.interval);
        // Skip the first tick (fires immediately)
        interval.tick().await;

        debug!("Watching {} every {:?}", self.path.display(), self.interval);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    if let Some(scroll) = self.poll() {
                        match scroller.update_config(scroll) {
                            Ok(()) => info!("Reloaded scroll settings from {}", self.path.display()),
                            Err(e) => {
                                warn!("Failed to apply reloaded settings: {}", e);
                                break;
                            }
                        }
                    }
                }
            }
        }
    }
}
