//! Core types used throughout the parkour workspace

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Look rotation in degrees
///
/// Yaw 0 faces -Z, positive yaw turns toward +X. Pitch is positive looking up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator::new(0.0, 0.0, 0.0);

    /// Create a rotator from pitch, yaw and roll in degrees
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Wrap a single angle into (-180, 180]
    pub fn normalize_axis(angle: f32) -> f32 {
        let mut angle = angle % 360.0;
        if angle > 180.0 {
            angle -= 360.0;
        } else if angle <= -180.0 {
            angle += 360.0;
        }
        angle
    }

    /// Copy with every axis wrapped into (-180, 180]
    pub fn normalized(self) -> Self {
        Self {
            pitch: Self::normalize_axis(self.pitch),
            yaw: Self::normalize_axis(self.yaw),
            roll: Self::normalize_axis(self.roll),
        }
    }

    /// Yaw-only rotation that faces along the horizontal part of `direction`
    pub fn facing(direction: Vec3) -> Self {
        if direction.x == 0.0 && direction.z == 0.0 {
            return Self::ZERO;
        }
        Self::new(0.0, direction.x.atan2(-direction.z).to_degrees(), 0.0)
    }

    /// Horizontal forward direction for this rotation's yaw
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.sin(), 0.0, -yaw.cos())
    }

    /// Horizontal right direction for this rotation's yaw
    pub fn right(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }

    /// Full look direction including pitch
    pub fn look_direction(&self) -> Vec3 {
        let pitch = self.pitch.to_radians();
        let cos_pitch = pitch.cos();
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.sin() * cos_pitch, pitch.sin(), -yaw.cos() * cos_pitch)
    }

    /// Check whether every axis is within `tolerance` degrees of `other`
    pub fn nearly_equals(&self, other: &Rotator, tolerance: f32) -> bool {
        let delta = (*other - *self).normalized();
        delta.pitch.abs() <= tolerance && delta.yaw.abs() <= tolerance && delta.roll.abs() <= tolerance
    }

    /// Interpolate toward `target` along the shortest way around each axis.
    ///
    /// A non-positive `speed` jumps straight to the target.
    pub fn interp_to(self, target: Rotator, dt: f32, speed: f32) -> Rotator {
        if dt == 0.0 || self == target {
            return self;
        }
        if speed <= 0.0 {
            return target;
        }

        let delta = (target - self).normalized();
        if delta.nearly_equals(&Rotator::ZERO, 1.0e-4) {
            return target;
        }

        let alpha = (dt * speed).clamp(0.0, 1.0);
        (self + delta * alpha).normalized()
    }
}

impl std::ops::Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl std::ops::Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}

impl std::ops::Mul<f32> for Rotator {
    type Output = Rotator;

    fn mul(self, rhs: f32) -> Rotator {
        Rotator::new(self.pitch * rhs, self.yaw * rhs, self.roll * rhs)
    }
}
