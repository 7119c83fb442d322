//! Camera roll and shake derived from movement state

use serde::{Deserialize, Serialize};

use super::CameraFeedbackConfig;
use crate::events::FeedbackEvent;
use crate::traversal::MovementMode;

/// Roll the camera should settle at for `mode`
///
/// Rolls away from a wall on the right and toward the left, and leans while sliding.
pub fn target_roll(mode: MovementMode, config: &CameraFeedbackConfig) -> f32 {
    match mode {
        MovementMode::WallRunRight | MovementMode::Slide => -config.movement_roll,
        MovementMode::WallRunLeft => config.movement_roll,
        _ => 0.0,
    }
}

/// Camera shake a host plays for a feedback event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraShake {
    JumpLand,
    LedgeGrab,
    Mantle,
    QuickMantle,
}

impl CameraShake {
    pub fn for_event(event: FeedbackEvent) -> Self {
        match event {
            FeedbackEvent::Jumped | FeedbackEvent::Landed => CameraShake::JumpLand,
            FeedbackEvent::LedgeGrabbed => CameraShake::LedgeGrab,
            FeedbackEvent::Mantled { quick: true } => CameraShake::QuickMantle,
            FeedbackEvent::Mantled { quick: false } => CameraShake::Mantle,
        }
    }
}
