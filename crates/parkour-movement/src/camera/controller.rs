//! Camera controller with mouse look

use glam::{Vec2, Vec3};
use parkour_core::Rotator;

use super::CameraConfig;

/// First-person view rotation driven by look input
pub struct CameraController {
    /// Configuration
    pub config: CameraConfig,
    /// Current view rotation, including any feedback roll
    pub rotation: Rotator,
}

impl CameraController {
    /// Create a new camera controller
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a camera controller with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            rotation: Rotator::ZERO,
        }
    }

    /// Horizontal forward direction
    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    /// Horizontal right direction
    pub fn right(&self) -> Vec3 {
        self.rotation.right()
    }

    /// Full look direction including pitch
    pub fn look_direction(&self) -> Vec3 {
        self.rotation.look_direction()
    }

    /// Handle mouse look input
    pub fn handle_mouse_look(&mut self, look_delta: Vec2) {
        if look_delta == Vec2::ZERO {
            return;
        }

        self.rotation.yaw =
            Rotator::normalize_axis(self.rotation.yaw + look_delta.x * self.config.sensitivity);

        self.rotation.pitch -= look_delta.y * self.config.sensitivity;
        self.rotation.pitch = self
            .rotation
            .pitch
            .clamp(self.config.pitch_min, self.config.pitch_max);
    }

    /// Turn the view to face a yaw in degrees
    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotation.yaw = Rotator::normalize_axis(yaw);
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_look_turns_and_clamps() {
        let mut camera = CameraController::new();
        camera.handle_mouse_look(Vec2::new(600.0, 0.0));
        assert!((camera.rotation.yaw - 90.0).abs() < 0.001);
        assert!((camera.forward() - Vec3::X).length() < 0.001);

        camera.handle_mouse_look(Vec2::new(0.0, -10_000.0));
        assert_eq!(camera.rotation.pitch, 89.0);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut camera = CameraController::new();
        camera.set_yaw(270.0);
        assert!((camera.rotation.yaw + 90.0).abs() < 0.001);
    }
}
