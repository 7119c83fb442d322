//! The seam between the traversal core and whatever simulates the capsule

use glam::Vec3;
use parkour_core::Rotator;
use parkour_physics::{Locomotion, LocomotionParams, WorldProbe};

/// Everything the traversal core reads from or drives on the character.
///
/// `location` is the capsule center. Forward and right are horizontal and
/// follow the look yaw.
pub trait CharacterBody: WorldProbe {
    fn location(&self) -> Vec3;

    /// Teleport the capsule center
    fn set_location(&mut self, location: Vec3);

    fn eye_location(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    /// Replace (`override_*`) or add to each part of the velocity and start falling
    fn launch(&mut self, velocity: Vec3, override_xy: bool, override_z: bool);

    /// Add an impulse; `velocity_change` ignores mass
    fn add_impulse(&mut self, impulse: Vec3, velocity_change: bool);

    fn stop_movement(&mut self);

    fn locomotion(&self) -> Locomotion;

    fn set_locomotion(&mut self, locomotion: Locomotion);

    fn is_falling(&self) -> bool {
        self.locomotion() == Locomotion::Falling
    }

    fn is_walking(&self) -> bool {
        self.locomotion() == Locomotion::Walking
    }

    /// Perform the standard ground jump, returning whether it happened
    fn jump(&mut self) -> bool;

    fn locomotion_params(&self) -> LocomotionParams;

    fn set_locomotion_params(&mut self, params: LocomotionParams);

    fn set_crouched(&mut self, crouched: bool);

    /// Restrict movement to the plane with this normal, or lift the restriction
    fn set_plane_constraint(&mut self, normal: Option<Vec3>);

    fn capsule_half_height(&self) -> f32;

    fn is_walkable(&self, normal: Vec3) -> bool;

    fn forward(&self) -> Vec3;

    fn right(&self) -> Vec3;

    fn up(&self) -> Vec3 {
        Vec3::Y
    }

    /// World-space movement input of the current tick
    fn last_input_direction(&self) -> Vec3;

    fn look_rotation(&self) -> Rotator;

    fn set_look_rotation(&mut self, rotation: Rotator);
}
