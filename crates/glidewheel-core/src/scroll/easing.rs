//! L4 Atomic Layer: Pure easing function for smooth scrolling animations
//!
//! The curve has two phases: a short quadratic ease-in followed by a long
//! quartic ease-out. The `ratio` argument is the deceleration time divided by
//! the acceleration time, so larger ratios give a snappier start and a longer
//! glide.

/// Apply the two-phase easing curve to a progress value
///
/// # Arguments
/// * `t` - Progress value in range [0, 1] (clamped)
/// * `ratio` - Deceleration/acceleration time ratio, at least 1
///
/// # Returns
/// Eased value in range [0, 1]
#[inline]
pub fn ease(t: f64, ratio: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let accel = acceleration_fraction(ratio);

    if t <= accel {
        quadratic_ease_in(t / accel) * accel
    } else {
        let u = (t - accel) / (1.0 - accel);
        accel + quartic_ease_out(u) * (1.0 - accel)
    }
}

/// Share of the animation spent accelerating: 1 / (1 + ratio)
#[inline]
pub fn acceleration_fraction(ratio: f64) -> f64 {
    1.0 / (1.0 + ratio.max(1.0))
}

/// Quadratic ease-in: f(t) = t²
#[inline]
fn quadratic_ease_in(t: f64) -> f64 {
    t * t
}

/// Quartic ease-out: f(t) = 1 - (1-t)⁴
#[inline]
fn quartic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for ratio in 1..=10 {
            let ratio = ratio as f64;
            assert!(ease(0.0, ratio).abs() < 1e-12, "ratio {} at t=0", ratio);
            assert!((ease(1.0, ratio) - 1.0).abs() < 1e-12, "ratio {} at t=1", ratio);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for ratio in [1.0, 2.0, 4.0, 7.5, 10.0] {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let t = i as f64 / 1000.0;
                let v = ease(t, ratio);
                assert!(v >= prev, "ratio {} not monotonic at t={}", ratio, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_easing_continuous_at_phase_boundary() {
        for ratio in [1.0, 4.0, 10.0] {
            let accel = acceleration_fraction(ratio);
            let before = ease(accel - 1e-9, ratio);
            let after = ease(accel + 1e-9, ratio);
            assert!((after - before).abs() < 1e-6, "ratio {} jumps at boundary", ratio);
            assert!((ease(accel, ratio) - accel).abs() < 1e-12);
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(ease(-0.5, 4.0), 0.0);
        assert_eq!(ease(1.5, 4.0), 1.0);
    }

    #[test]
    fn test_acceleration_fraction() {
        assert!((acceleration_fraction(4.0) - 0.2).abs() < 1e-12);
        assert!((acceleration_fraction(1.0) - 0.5).abs() < 1e-12);
        // Ratios below 1 are treated as 1
        assert!((acceleration_fraction(0.0) - 0.5).abs() < 1e-12);
    }
}
