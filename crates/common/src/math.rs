//! Angle and smoothing helpers shared by the controllers.
//!
//! Yaw convention: a yaw of `0` faces world +Z and the facing vector is
//! `(sin yaw, 0, cos yaw)`, so `yaw == atan2(x, z)`.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Unit horizontal vector for a yaw angle.
pub fn facing_vector(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw of the horizontal part of `dir`, or `None` when it has no horizontal extent.
pub fn yaw_of(dir: Vec3) -> Option<f32> {
    if dir.x == 0.0 && dir.z == 0.0 {
        return None;
    }
    Some(dir.x.atan2(dir.z))
}

/// `v` projected onto the y = 0 plane and normalized; zero if nothing remains.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(a: f32) -> f32 {
    let mut x = a % TAU;
    if x > PI {
        x -= TAU;
    } else if x <= -PI {
        x += TAU;
    }
    x
}

/// Convert a per-reference-tick lerp factor into the weight for a step of `dt` seconds.
///
/// Applying the returned weight at any frame rate covers the same fraction of the
/// remaining distance per second as applying `factor` once per reference tick.
pub fn smoothing_weight(factor: f32, dt: f32, reference_rate: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    let keep = (1.0 - factor.clamp(0.0, 1.0)).powf(dt * reference_rate);
    1.0 - keep
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn facing_vector_matches_yaw_of() {
        for yaw in [0.0, 0.5, -1.2, 2.9] {
            let back = yaw_of(facing_vector(yaw)).unwrap();
            assert!((wrap_angle(back - yaw)).abs() < EPS);
        }
    }

    #[test]
    fn yaw_of_vertical_is_none() {
        assert!(yaw_of(Vec3::Y).is_none());
        assert!(yaw_of(Vec3::ZERO).is_none());
    }

    #[test]
    fn flatten_drops_height() {
        let f = flatten(Vec3::new(3.0, 10.0, 4.0));
        assert!((f - Vec3::new(0.6, 0.0, 0.8)).length() < EPS);
        assert_eq!(flatten(Vec3::new(0.0, -2.0, 0.0)), Vec3::ZERO);
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert!((wrap_angle(PI + 0.5) - (0.5 - PI)).abs() < 1e-4);
        assert!((wrap_angle(-0.25 - TAU) + 0.25).abs() < 1e-4);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn smoothing_weight_equals_factor_at_reference_rate() {
        let w = smoothing_weight(0.2, 1.0 / 60.0, 60.0);
        assert!((w - 0.2).abs() < EPS);
    }

    #[test]
    fn smoothing_weight_compounds_over_substeps() {
        // Two half-length steps cover the same ground as one full step.
        let half = smoothing_weight(0.2, 1.0 / 120.0, 60.0);
        let remaining = (1.0 - half) * (1.0 - half);
        assert!((remaining - 0.8).abs() < EPS);
    }

    #[test]
    fn smoothing_weight_zero_dt_is_zero() {
        assert_eq!(smoothing_weight(0.5, 0.0, 60.0), 0.0);
    }
}
