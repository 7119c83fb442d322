//! Action-based input state
//!
//! Hosts translate their raw devices into [`InputAction`]s; the player
//! controller only ever sees this per-tick snapshot.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Actions the movement layer responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    /// Crouch, or slide while sprinting
    Crouch,
    Sprint,
}

/// Current state of all inputs for a tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this tick
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this tick
    pub just_released: HashSet<InputAction>,
    /// Look delta for this tick (x turns right, y looks down)
    pub look_delta: Vec2,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action going down
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Record an action going up
    pub fn release(&mut self, action: InputAction) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this tick
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this tick
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Movement axes from the held actions: x is strafe (right positive), y is forward
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.is_held(InputAction::MoveForward) {
            axis.y += 1.0;
        }
        if self.is_held(InputAction::MoveBackward) {
            axis.y -= 1.0;
        }
        if self.is_held(InputAction::MoveRight) {
            axis.x += 1.0;
        }
        if self.is_held(InputAction::MoveLeft) {
            axis.x -= 1.0;
        }
        axis.normalize_or_zero()
    }

    /// Clear tick-specific data (call after each fixed update)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.look_delta = Vec2::ZERO;
    }
}
