//! [`CharacterBody`] over the rapier-backed capsule integrator

use glam::Vec3;
use parkour_core::Rotator;
use parkour_physics::{
    CharacterController, Locomotion, LocomotionParams, PhysicsWorld, Probe, TraceResult,
    WorldProbe,
};

use crate::camera::CameraController;
use crate::host::CharacterBody;

/// A character, its view and the world it moves in, borrowed for one call
/// into the traversal core
pub struct PhysicsBody<'a> {
    pub character: &'a mut CharacterController,
    pub camera: &'a mut CameraController,
    pub physics: &'a mut PhysicsWorld,
}

impl PhysicsBody<'_> {
    fn probe(&self) -> Probe<'_> {
        Probe::new(&*self.physics, self.character.collider_handle)
    }
}

impl WorldProbe for PhysicsBody<'_> {
    fn line_trace(&self, start: Vec3, end: Vec3) -> TraceResult {
        self.probe().line_trace(start, end)
    }

    fn capsule_sweep(&self, start: Vec3, end: Vec3, radius: f32, half_height: f32) -> TraceResult {
        self.probe().capsule_sweep(start, end, radius, half_height)
    }
}

impl CharacterBody for PhysicsBody<'_> {
    fn location(&self) -> Vec3 {
        self.character.center_position()
    }

    fn set_location(&mut self, location: Vec3) {
        self.character.set_center_position(self.physics, location);
    }

    fn eye_location(&self) -> Vec3 {
        self.character.eye_position()
    }

    fn velocity(&self) -> Vec3 {
        self.character.velocity
    }

    fn launch(&mut self, velocity: Vec3, override_xy: bool, override_z: bool) {
        self.character.launch(velocity, override_xy, override_z);
    }

    fn add_impulse(&mut self, impulse: Vec3, velocity_change: bool) {
        self.character.add_impulse(impulse, velocity_change);
    }

    fn stop_movement(&mut self) {
        self.character.stop_movement();
    }

    fn locomotion(&self) -> Locomotion {
        self.character.locomotion()
    }

    fn set_locomotion(&mut self, locomotion: Locomotion) {
        self.character.set_locomotion(locomotion);
    }

    fn jump(&mut self) -> bool {
        self.character.jump()
    }

    fn locomotion_params(&self) -> LocomotionParams {
        self.character.params
    }

    fn set_locomotion_params(&mut self, params: LocomotionParams) {
        self.character.params = params;
    }

    fn set_crouched(&mut self, crouched: bool) {
        self.character.set_crouched(crouched);
    }

    fn set_plane_constraint(&mut self, normal: Option<Vec3>) {
        self.character.set_plane_constraint(normal);
    }

    fn capsule_half_height(&self) -> f32 {
        self.character.capsule_half_height()
    }

    fn is_walkable(&self, normal: Vec3) -> bool {
        self.character.is_walkable(normal)
    }

    fn forward(&self) -> Vec3 {
        self.camera.forward()
    }

    fn right(&self) -> Vec3 {
        self.camera.right()
    }

    fn last_input_direction(&self) -> Vec3 {
        self.character.move_input()
    }

    fn look_rotation(&self) -> Rotator {
        self.camera.rotation
    }

    fn set_look_rotation(&mut self, rotation: Rotator) {
        self.camera.rotation = rotation;
    }
}
