//! Interpolation and vector helpers
//!
//! The `*_interp_to` helpers move a value toward a target by a fraction of the
//! remaining distance each step (`dt * speed`, clamped to 1), so the approach is
//! fast at first and eases in near the target.

use glam::Vec3;

/// Squared distance below which vector interpolation snaps to the target
const SNAP_DISTANCE_SQUARED: f32 = 1.0e-4;

/// Interpolate a scalar toward a target.
///
/// A non-positive `speed` jumps straight to the target.
pub fn interp_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist * dist < SNAP_DISTANCE_SQUARED {
        return target;
    }

    current + dist * (dt * speed).clamp(0.0, 1.0)
}

/// Interpolate a vector toward a target.
///
/// A non-positive `speed` jumps straight to the target.
pub fn vec_interp_to(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist.length_squared() < SNAP_DISTANCE_SQUARED {
        return target;
    }

    current + dist * (dt * speed).clamp(0.0, 1.0)
}

/// Length of the horizontal (X, Z) part of a vector
pub fn size_2d(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Horizontal (X, Z) part of a vector with the vertical component removed
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_to_moves_fraction_of_distance() {
        let value = interp_to(0.0, 10.0, 0.1, 5.0);
        assert!((value - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_interp_to_clamps_alpha() {
        assert_eq!(interp_to(0.0, 10.0, 1.0, 30.0), 10.0);
        assert_eq!(interp_to(3.0, 10.0, 0.016, 0.0), 10.0);
    }

    #[test]
    fn test_vec_interp_to_snaps_when_close() {
        let target = Vec3::new(1.0, 2.0, 3.0);
        let result = vec_interp_to(target + Vec3::splat(0.001), target, 0.016, 10.0);
        assert_eq!(result, target);
    }

    #[test]
    fn test_size_2d_ignores_vertical() {
        assert!((size_2d(Vec3::new(3.0, 100.0, 4.0)) - 5.0).abs() < 0.001);
        assert_eq!(horizontal(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 0.0, 3.0));
    }
}
