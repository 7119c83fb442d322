//! First-person camera module
//!
//! Provides mouse look and the roll and shake feedback derived from the
//! current movement mode.

mod config;
mod controller;
mod feedback;

pub use config::{CameraConfig, CameraFeedbackConfig};
pub use controller::CameraController;
pub use feedback::{target_roll, CameraShake};
