//! Scriptable character body for traversal tests

use glam::Vec3;
use parkour_core::Rotator;
use parkour_physics::{Locomotion, LocomotionParams, TraceResult, WorldProbe};

use crate::host::CharacterBody;

pub const DT: f32 = 1.0 / 60.0;

type LineTrace = Box<dyn Fn(Vec3, Vec3) -> TraceResult>;
type CapsuleSweep = Box<dyn Fn(Vec3, Vec3, f32, f32) -> TraceResult>;

/// A body that records what the traversal core did to it.
///
/// Traces miss until a closure is installed. Facing follows `look`, so the
/// default faces -Z with +X on the right.
pub struct MockBody {
    pub location: Vec3,
    pub velocity: Vec3,
    pub locomotion: Locomotion,
    pub params: LocomotionParams,
    pub crouched: bool,
    pub plane_constraint: Option<Vec3>,
    pub half_height: f32,
    pub mass: f32,
    pub input_direction: Vec3,
    pub look: Rotator,
    pub launches: Vec<(Vec3, bool, bool)>,
    pub impulses: Vec<(Vec3, bool)>,
    pub jumps: u32,
    line_trace: LineTrace,
    capsule_sweep: CapsuleSweep,
}

impl MockBody {
    pub fn new() -> Self {
        Self {
            location: Vec3::ZERO,
            velocity: Vec3::ZERO,
            locomotion: Locomotion::Walking,
            params: LocomotionParams::default(),
            crouched: false,
            plane_constraint: None,
            half_height: 96.0,
            mass: 100.0,
            input_direction: Vec3::ZERO,
            look: Rotator::ZERO,
            launches: Vec::new(),
            impulses: Vec::new(),
            jumps: 0,
            line_trace: Box::new(|_, _| TraceResult::miss()),
            capsule_sweep: Box::new(|_, _, _, _| TraceResult::miss()),
        }
    }

    pub fn set_line_trace(&mut self, trace: impl Fn(Vec3, Vec3) -> TraceResult + 'static) {
        self.line_trace = Box::new(trace);
    }

    pub fn set_capsule_sweep(
        &mut self,
        sweep: impl Fn(Vec3, Vec3, f32, f32) -> TraceResult + 'static,
    ) {
        self.capsule_sweep = Box::new(sweep);
    }
}

impl WorldProbe for MockBody {
    fn line_trace(&self, start: Vec3, end: Vec3) -> TraceResult {
        (self.line_trace)(start, end)
    }

    fn capsule_sweep(&self, start: Vec3, end: Vec3, radius: f32, half_height: f32) -> TraceResult {
        (self.capsule_sweep)(start, end, radius, half_height)
    }
}

impl CharacterBody for MockBody {
    fn location(&self) -> Vec3 {
        self.location
    }

    fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    fn eye_location(&self) -> Vec3 {
        self.location + Vec3::Y * 64.0
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn launch(&mut self, velocity: Vec3, override_xy: bool, override_z: bool) {
        self.launches.push((velocity, override_xy, override_z));
        if override_xy {
            self.velocity.x = velocity.x;
            self.velocity.z = velocity.z;
        } else {
            self.velocity.x += velocity.x;
            self.velocity.z += velocity.z;
        }
        if override_z {
            self.velocity.y = velocity.y;
        } else {
            self.velocity.y += velocity.y;
        }
        self.locomotion = Locomotion::Falling;
    }

    fn add_impulse(&mut self, impulse: Vec3, velocity_change: bool) {
        self.impulses.push((impulse, velocity_change));
        if velocity_change {
            self.velocity += impulse;
        } else {
            self.velocity += impulse / self.mass;
        }
    }

    fn stop_movement(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    fn set_locomotion(&mut self, locomotion: Locomotion) {
        self.locomotion = locomotion;
    }

    fn jump(&mut self) -> bool {
        if self.locomotion != Locomotion::Walking {
            return false;
        }
        self.velocity.y = 420.0;
        self.locomotion = Locomotion::Falling;
        self.jumps += 1;
        true
    }

    fn locomotion_params(&self) -> LocomotionParams {
        self.params
    }

    fn set_locomotion_params(&mut self, params: LocomotionParams) {
        self.params = params;
    }

    fn set_crouched(&mut self, crouched: bool) {
        self.crouched = crouched;
    }

    fn set_plane_constraint(&mut self, normal: Option<Vec3>) {
        self.plane_constraint = normal;
    }

    fn capsule_half_height(&self) -> f32 {
        self.half_height
    }

    fn is_walkable(&self, normal: Vec3) -> bool {
        normal.y >= 0.71
    }

    fn forward(&self) -> Vec3 {
        self.look.forward()
    }

    fn right(&self) -> Vec3 {
        self.look.right()
    }

    fn last_input_direction(&self) -> Vec3 {
        self.input_direction
    }

    fn look_rotation(&self) -> Rotator {
        self.look
    }

    fn set_look_rotation(&mut self, rotation: Rotator) {
        self.look = rotation;
    }
}
