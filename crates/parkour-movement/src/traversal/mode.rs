//! Movement modes

use parkour_physics::Locomotion;
use serde::{Deserialize, Serialize};

/// The single active traversal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementMode {
    #[default]
    None,
    Crouch,
    Slide,
    WallRunLeft,
    WallRunRight,
    WallClimb,
    LedgeGrab,
    Mantle,
    Sprint,
}

impl MovementMode {
    /// Underlying locomotion the integrator uses for this mode
    pub fn locomotion(self) -> Locomotion {
        match self {
            MovementMode::None
            | MovementMode::Crouch
            | MovementMode::Slide
            | MovementMode::Mantle
            | MovementMode::Sprint => Locomotion::Walking,
            MovementMode::WallRunLeft
            | MovementMode::WallRunRight
            | MovementMode::WallClimb
            | MovementMode::LedgeGrab => Locomotion::Falling,
        }
    }

    pub fn is_wall_running(self) -> bool {
        matches!(self, MovementMode::WallRunLeft | MovementMode::WallRunRight)
    }

    /// Ledge grab, wall climb and mantle share one exit path
    pub fn is_climbing(self) -> bool {
        matches!(
            self,
            MovementMode::LedgeGrab | MovementMode::WallClimb | MovementMode::Mantle
        )
    }

    /// Modes that restore the baseline parameters on entry
    pub fn restores_baseline(self) -> bool {
        matches!(self, MovementMode::None | MovementMode::Crouch)
    }
}
