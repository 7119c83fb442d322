//! Camera configuration

use serde::{Deserialize, Serialize};

/// Roll applied while wall-running or sliding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraFeedbackConfig {
    /// Roll magnitude in degrees
    pub movement_roll: f32,
    /// Interpolation speed toward the target roll
    pub tilt_interp_speed: f32,
}

impl Default for CameraFeedbackConfig {
    fn default() -> Self {
        Self {
            movement_roll: 15.0,
            tilt_interp_speed: 10.0,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Mouse sensitivity (degrees per unit of look delta)
    pub sensitivity: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
    pub feedback: CameraFeedbackConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.15,
            pitch_min: -89.0,
            pitch_max: 89.0,
            feedback: CameraFeedbackConfig::default(),
        }
    }
}
