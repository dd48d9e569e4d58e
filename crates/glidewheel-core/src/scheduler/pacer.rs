//! Adaptive frame interval controller

use std::time::{Duration, Instant};

use crate::config::ScrollConfig;

/// Frame interval used when adaptive pacing is off (~60Hz)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Interval adjustment applied per frame in adaptive mode
const INTERVAL_STEP_MS: u64 = 2;

/// Chooses the frame timer period.
///
/// Fast-moving animations tick often; slow, settling ones back off toward
/// `max_update_interval_ms`.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: u64,
    last_frame_at: Option<Instant>,
    last_frame_distance: f64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            last_frame_at: None,
            last_frame_distance: 0.0,
        }
    }
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Pick the interval to arm the timer with after a wheel input
    ///
    /// Large moves (over two steps) get the fastest rate, small ones (under
    /// half a step) the slowest, anything between the midpoint.
    pub fn on_input(&mut self, distance: f64, config: &ScrollConfig) -> Duration {
        self.interval_ms = if config.enable_adaptive_frame_rate {
            let magnitude = distance.abs();
            let step = config.step_size_px();
            if magnitude > step * 2.0 {
                config.min_update_interval_ms
            } else if magnitude < step * 0.5 {
                config.max_update_interval_ms
            } else {
                (config.min_update_interval_ms + config.max_update_interval_ms) / 2
            }
        } else {
            DEFAULT_FRAME_INTERVAL_MS
        };
        self.interval()
    }

    /// Record a frame and return the new interval if it changed
    ///
    /// Only adapts when `enable_adaptive_frame_rate` is set. The interval
    /// always ends up within `[min_update_interval_ms, max_update_interval_ms]`.
    pub fn on_frame(&mut self, frame_distance: f64, now: Instant, config: &ScrollConfig) -> Option<Duration> {
        if !config.enable_adaptive_frame_rate {
            return None;
        }

        let previous = self.interval_ms;
        let stable_timing = self
            .last_frame_at
            .map(|last| {
                let frame_time = now.saturating_duration_since(last).as_secs_f64() * 1000.0;
                frame_time < previous as f64 * 1.5
            })
            .unwrap_or(false);
        let change = (frame_distance - self.last_frame_distance).abs();
        let threshold = config.min_scroll_threshold;

        let mut next = previous;
        if change < threshold * 0.5 && stable_timing {
            next = previous + INTERVAL_STEP_MS;
        } else if change > threshold * 2.0 {
            next = previous.saturating_sub(INTERVAL_STEP_MS);
        }
        // Unvalidated snapshots may carry min > max
        self.interval_ms = next
            .max(config.min_update_interval_ms)
            .min(config.max_update_interval_ms);

        self.last_frame_at = Some(now);
        self.last_frame_distance = frame_distance;

        (self.interval_ms != previous).then(|| self.interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fixed_interval_without_adaptive() {
        let config = ScrollConfig {
            enable_adaptive_frame_rate: false,
            ..Default::default()
        };
        let mut pacer = FramePacer::new();
        assert_eq!(pacer.on_input(500.0, &config), ms(16));
        assert_eq!(pacer.on_frame(50.0, Instant::now(), &config), None);
        assert_eq!(pacer.interval(), ms(16));
    }

    #[test]
    fn test_initial_interval_follows_magnitude() {
        let config = ScrollConfig::default();
        let mut pacer = FramePacer::new();
        assert_eq!(pacer.on_input(200.0, &config), ms(8));
        assert_eq!(pacer.on_input(-30.0, &config), ms(33));
        assert_eq!(pacer.on_input(90.0, &config), ms(20));
    }

    #[test]
    fn test_settling_frames_slow_down() {
        let config = ScrollConfig::default();
        let mut pacer = FramePacer::new();
        pacer.on_input(90.0, &config);
        let start = Instant::now();

        // First frame has no timing history
        assert_eq!(pacer.on_frame(0.1, start, &config), None);
        // Nearly identical frame at the expected cadence: back off by 2ms
        assert_eq!(pacer.on_frame(0.1, start + ms(20), &config), Some(ms(22)));
    }

    #[test]
    fn test_fast_changes_speed_up() {
        let config = ScrollConfig::default();
        let mut pacer = FramePacer::new();
        pacer.on_input(90.0, &config);
        let start = Instant::now();
        pacer.on_frame(1.0, start, &config);
        assert_eq!(pacer.on_frame(10.0, start + ms(20), &config), Some(ms(18)));
    }

    #[test]
    fn test_late_frame_does_not_slow_down() {
        let config = ScrollConfig::default();
        let mut pacer = FramePacer::new();
        pacer.on_input(90.0, &config);
        let start = Instant::now();
        pacer.on_frame(0.1, start, &config);
        // 50ms gap is beyond 1.5x the 20ms interval
        assert_eq!(pacer.on_frame(0.1, start + ms(50), &config), None);
    }

    #[test]
    fn test_interval_stays_in_bounds() {
        let config = ScrollConfig::default();
        let mut pacer = FramePacer::new();
        let mut now = Instant::now();

        for distance in [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0] {
            pacer.on_frame(distance, now, &config);
            now += pacer.interval();
            assert!(pacer.interval() >= ms(8) && pacer.interval() <= ms(33));
        }
        assert_eq!(pacer.interval(), ms(33));

        let mut distance = 0.0;
        for _ in 0..30 {
            distance += 5.0;
            pacer.on_frame(distance, now, &config);
            now += pacer.interval();
            assert!(pacer.interval() >= ms(8) && pacer.interval() <= ms(33));
        }
        assert_eq!(pacer.interval(), ms(8));
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let config = ScrollConfig {
            min_update_interval_ms: 40,
            max_update_interval_ms: 20,
            ..Default::default()
        };
        let mut pacer = FramePacer::new();
        let start = Instant::now();
        pacer.on_frame(0.0, start, &config);
        pacer.on_frame(5.0, start + ms(16), &config);
        assert_eq!(pacer.interval(), ms(20));
    }

    #[test]
    fn test_config_change_pulls_interval_into_range() {
        let mut pacer = FramePacer::new();
        let config = ScrollConfig {
            min_update_interval_ms: 25,
            max_update_interval_ms: 40,
            ..Default::default()
        };
        // Default 16ms is below the new floor
        pacer.on_frame(1.0, Instant::now(), &config);
        assert_eq!(pacer.interval(), ms(25));
    }
}
