//! L4 Atomic Layer: Time and distance calculations for scroll animations
//!
//! Pure functions; callers pass `now` explicitly so results are reproducible.

use std::time::{Duration, Instant};

use crate::config::ScrollConfig;
use crate::types::WHEEL_DELTA;

/// Inputs closer together than this count as one accelerating gesture
pub const ACCELERATION_WINDOW: Duration = Duration::from_millis(100);

/// Calculate animation progress (0.0 to 1.0) from start time and duration
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Scroll direction of a wheel delta, honouring `reverse_direction`
#[inline]
pub fn direction(delta: i16, config: &ScrollConfig) -> f64 {
    let dir = if delta > 0 { 1.0 } else { -1.0 };
    if config.reverse_direction {
        -dir
    } else {
        dir
    }
}

/// Signed pixel distance for one wheel event, before acceleration
///
/// `(|delta| / 120) * step_size * direction`
#[inline]
pub fn base_distance(delta: i16, config: &ScrollConfig) -> f64 {
    let notches = (delta as f64).abs() / WHEEL_DELTA;
    notches * config.step_size_px() * direction(delta, config)
}

/// Multiplier applied to an input that follows the previous one quickly
///
/// `min(acceleration_max, 1 + (acceleration_delta / 100) * (100 - dt_ms) / 100)`
/// for gaps under 100ms, 1.0 otherwise.
#[inline]
pub fn acceleration_factor(since_previous: Duration, config: &ScrollConfig) -> f64 {
    if since_previous >= ACCELERATION_WINDOW {
        return 1.0;
    }
    let window_ms = ACCELERATION_WINDOW.as_secs_f64() * 1000.0;
    let gap_ms = since_previous.as_secs_f64() * 1000.0;
    let boost = 1.0 + (config.acceleration_delta as f64 / 100.0) * (window_ms - gap_ms) / window_ms;
    boost.min(config.acceleration_max as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, start, duration), 0.0);
        assert!((progress(start, start + Duration::from_millis(50), duration) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, start + Duration::from_secs(1), duration), 1.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_is_complete() {
        let start = Instant::now();
        let duration = Duration::from_millis(360);
        assert!(!is_complete(start, start + Duration::from_millis(359), duration));
        assert!(is_complete(start, start + Duration::from_millis(360), duration));
    }

    #[test]
    fn test_base_distance() {
        let config = ScrollConfig::default();
        assert!((base_distance(120, &config) - 90.0).abs() < 1e-9);
        assert!((base_distance(-240, &config) + 180.0).abs() < 1e-9);
        // High resolution wheels send fractions of a notch
        assert!((base_distance(30, &config) - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_base_distance_reversed() {
        let config = ScrollConfig {
            reverse_direction: true,
            ..Default::default()
        };
        assert!((base_distance(120, &config) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_acceleration_factor() {
        let config = ScrollConfig::default();
        assert_eq!(acceleration_factor(Duration::from_millis(100), &config), 1.0);
        assert_eq!(acceleration_factor(Duration::from_millis(500), &config), 1.0);
        // 50ms gap: 1 + 0.7 * 0.5
        let factor = acceleration_factor(Duration::from_millis(50), &config);
        assert!((factor - 1.35).abs() < 1e-9);
    }

    #[test]
    fn test_acceleration_factor_capped() {
        let config = ScrollConfig {
            acceleration_delta: 100,
            acceleration_max: 1,
            ..Default::default()
        };
        assert_eq!(acceleration_factor(Duration::ZERO, &config), 1.0);
    }
}
