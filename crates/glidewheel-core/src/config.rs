use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Reload the scroll settings when the config file changes
    #[serde(default = "default_true")]
    pub watch_config: bool,
    /// How often the config file is checked for changes
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            watch_config: default_true(),
            watch_interval_ms: default_watch_interval(),
        }
    }
}

/// Smooth scrolling parameters.
///
/// This is the snapshot handed to the engine. It is replaced wholesale on
/// every update and must pass through [`ScrollConfig::validate`] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Pixels scrolled per wheel notch (min 1)
    #[serde(default = "default_step_size")]
    pub step_size: u32,
    /// Duration of one scroll animation (100 - 2000ms)
    #[serde(default = "default_animation_time")]
    pub animation_time_ms: u64,
    /// Acceleration strength for rapid consecutive notches (1 - 100)
    #[serde(default = "default_acceleration_delta")]
    pub acceleration_delta: u32,
    /// Upper bound of the acceleration multiplier (1 - 20)
    #[serde(default = "default_acceleration_max")]
    pub acceleration_max: u32,
    /// Deceleration time over acceleration time within one animation (1 - 10)
    #[serde(default = "default_tail_to_head_ratio")]
    pub tail_to_head_ratio: u32,
    /// Invert the scroll direction
    #[serde(default)]
    pub reverse_direction: bool,
    /// Smallest distance (px) worth emitting; also the idle threshold (0.1 - 2.0)
    #[serde(default = "default_min_scroll_threshold")]
    pub min_scroll_threshold: f64,
    /// Adapt the frame interval to how fast the animation is moving
    #[serde(default = "default_true")]
    pub enable_adaptive_frame_rate: bool,
    /// Shortest frame interval in adaptive mode (4 - 50ms)
    #[serde(default = "default_min_update_interval")]
    pub min_update_interval_ms: u64,
    /// Longest frame interval in adaptive mode (min_update_interval_ms - 100ms)
    #[serde(default = "default_max_update_interval")]
    pub max_update_interval_ms: u64,
    /// Master switch; when off every wheel event passes through untouched
    #[serde(default = "default_true")]
    pub enable_smooth_scroll: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_size: default_step_size(),
            animation_time_ms: default_animation_time(),
            acceleration_delta: default_acceleration_delta(),
            acceleration_max: default_acceleration_max(),
            tail_to_head_ratio: default_tail_to_head_ratio(),
            reverse_direction: false,
            min_scroll_threshold: default_min_scroll_threshold(),
            enable_adaptive_frame_rate: default_true(),
            min_update_interval_ms: default_min_update_interval(),
            max_update_interval_ms: default_max_update_interval(),
            enable_smooth_scroll: default_true(),
        }
    }
}

impl ScrollConfig {
    /// Clamp every field into its supported range
    pub fn validate(&mut self) {
        self.step_size = self.step_size.max(1);
        self.animation_time_ms = self.animation_time_ms.clamp(100, 2000);
        self.acceleration_delta = self.acceleration_delta.clamp(1, 100);
        self.acceleration_max = self.acceleration_max.clamp(1, 20);
        self.tail_to_head_ratio = self.tail_to_head_ratio.clamp(1, 10);
        self.min_scroll_threshold = if self.min_scroll_threshold.is_nan() {
            default_min_scroll_threshold()
        } else {
            self.min_scroll_threshold.clamp(0.1, 2.0)
        };
        self.min_update_interval_ms = self.min_update_interval_ms.clamp(4, 50);
        self.max_update_interval_ms = self
            .max_update_interval_ms
            .clamp(self.min_update_interval_ms, 100);
    }

    /// Consuming variant of [`ScrollConfig::validate`]
    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }

    /// Restore the tuning values while keeping frame pacing settings
    pub fn reset_to_defaults(&mut self) {
        let defaults = Self::default();
        self.step_size = defaults.step_size;
        self.animation_time_ms = defaults.animation_time_ms;
        self.acceleration_delta = defaults.acceleration_delta;
        self.acceleration_max = defaults.acceleration_max;
        self.tail_to_head_ratio = defaults.tail_to_head_ratio;
        self.enable_smooth_scroll = defaults.enable_smooth_scroll;
        self.reverse_direction = defaults.reverse_direction;
        self.min_scroll_threshold = defaults.min_scroll_threshold;
    }

    #[inline]
    pub fn animation_time(&self) -> Duration {
        Duration::from_millis(self.animation_time_ms)
    }

    #[inline]
    pub fn step_size_px(&self) -> f64 {
        self.step_size.max(1) as f64
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_watch_interval() -> u64 {
    1000
}

fn default_step_size() -> u32 {
    90
}

fn default_animation_time() -> u64 {
    360
}

fn default_acceleration_delta() -> u32 {
    70
}

fn default_acceleration_max() -> u32 {
    7
}

fn default_tail_to_head_ratio() -> u32 {
    4
}

fn default_min_scroll_threshold() -> f64 {
    0.5
}

fn default_min_update_interval() -> u64 {
    8
}

fn default_max_update_interval() -> u64 {
    33
}

/// Expand tilde (~) in path to user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_or_init(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                tracing::warn!("Failed to write default config to {}: {}", path.display(), e);
            }
            Ok(config)
        }
    }

    /// Load configuration from an explicit file; scroll values are clamped
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text; scroll values are clamped
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.scroll.validate();
        Ok(config)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/glidewheel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("glidewheel")
            .join("config.toml")
    }

    /// Interval between config file checks
    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.general.watch_interval_ms.max(100))
    }
}
