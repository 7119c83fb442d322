//! Player controller with traversal and physics

use glam::Vec3;
use parkour_physics::{CharacterController, CharacterControllerConfig, PhysicsWorld};

use super::PhysicsBody;
use crate::camera::{CameraConfig, CameraController};
use crate::config::TraversalConfig;
use crate::events::FeedbackEvent;
use crate::input::{InputAction, InputState};
use crate::traversal::{MovementMode, TraversalController};

/// Player controller handling input, traversal and physics
pub struct PlayerController {
    /// Physics character controller
    pub character: CharacterController,
    /// First-person view
    pub camera: CameraController,
    /// Parkour state machine
    pub traversal: TraversalController,
}

impl PlayerController {
    /// Spawn a player with its feet at `position`
    pub fn spawn(
        physics: &mut PhysicsWorld,
        position: Vec3,
        character: CharacterControllerConfig,
        camera: CameraConfig,
        traversal: TraversalConfig,
    ) -> Self {
        let mut character = CharacterController::with_config(character);
        character.spawn(physics, position);
        let feedback = camera.feedback.clone();
        let mut camera = CameraController::with_config(camera);

        let body = PhysicsBody {
            character: &mut character,
            camera: &mut camera,
            physics,
        };
        let traversal = TraversalController::spawn(traversal, feedback, &body);

        Self {
            character,
            camera,
            traversal,
        }
    }

    /// Get the player's feet position
    pub fn position(&self) -> Vec3 {
        self.character.position
    }

    /// Get the player's eye position (for camera)
    pub fn eye_position(&self) -> Vec3 {
        self.character.eye_position()
    }

    pub fn mode(&self) -> MovementMode {
        self.traversal.mode()
    }

    /// Check if the player is grounded
    pub fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }

    /// Update the player (fixed timestep), returning the feedback raised this tick
    pub fn fixed_update(
        &mut self,
        physics: &mut PhysicsWorld,
        input: &InputState,
        dt: f32,
    ) -> Vec<FeedbackEvent> {
        self.camera.handle_mouse_look(input.look_delta);

        // Movement input relative to the view yaw
        let axis = input.move_axis();
        let wish = self.camera.forward() * axis.y + self.camera.right() * axis.x;
        self.character.set_move_input(wish);

        let mut body = PhysicsBody {
            character: &mut self.character,
            camera: &mut self.camera,
            physics: &mut *physics,
        };

        if input.is_just_pressed(InputAction::Jump) {
            self.traversal.on_jump_pressed(&mut body);
        }
        if input.is_just_pressed(InputAction::Crouch) {
            self.traversal.crouch_or_slide(&mut body);
        }
        if input.is_just_pressed(InputAction::Sprint) {
            self.traversal.sprint_pressed(&mut body);
        }
        if input.is_just_released(InputAction::Sprint) {
            self.traversal.sprint_released();
        }

        self.traversal.tick(&mut body, dt);

        let locomotion = self.character.update(physics, dt);

        let mut body = PhysicsBody {
            character: &mut self.character,
            camera: &mut self.camera,
            physics,
        };
        if locomotion.left_ground {
            self.traversal.on_left_ground(&mut body);
        }
        if locomotion.landed {
            self.traversal.on_landed(&mut body);
        }

        self.traversal.drain_events()
    }

    /// Teleport the player to a position
    pub fn teleport(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.set_position(physics, position);
        self.character.stop_movement();
    }
}
