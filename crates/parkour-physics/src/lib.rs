//! Parkour Physics - Collision world and capsule locomotion using rapier3d
//!
//! Provides the static collision world, the geometry probe (line traces and
//! capsule sweeps), and the walking/falling character integrator that the
//! traversal layer drives.

mod character_controller;
mod probe;

pub use character_controller::{
    CharacterController, CharacterControllerConfig, Locomotion, LocomotionEvents, LocomotionParams,
};
pub use probe::{Probe, TraceResult, WorldProbe};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::parry::shape::Capsule;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity vector in world units per second squared (default: -980 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -980.0, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// The collision world the character moves through
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for traces and sweeps
    pub(crate) query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation
    pub fn step(&mut self) {
        let gravity = to_vector(self.config.gravity);

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.update_queries();
    }

    /// Refresh the query pipeline after colliders were added or moved
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, ledges)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Trace a line from `start` to `end` and report the first blocking hit
    pub fn line_trace(&self, start: Vec3, end: Vec3, filter: QueryFilter) -> TraceResult {
        let delta = end - start;
        let length = delta.length();
        if length <= f32::EPSILON {
            return TraceResult::miss();
        }
        let direction = delta / length;

        let ray = Ray::new(to_point(start), to_vector(direction));

        self.query_pipeline
            .cast_ray_and_get_normal(&self.rigid_body_set, &self.collider_set, &ray, length, true, filter)
            .map(|(_handle, intersection)| {
                TraceResult::hit(
                    start + direction * intersection.time_of_impact,
                    from_vector(&intersection.normal),
                    intersection.time_of_impact,
                )
            })
            .unwrap_or_else(TraceResult::miss)
    }

    /// Sweep an upright capsule from `start` to `end` and report the first blocking hit
    ///
    /// `half_height` is measured from the capsule center to the tip of a cap, so
    /// a half height at or below `radius` sweeps a sphere.
    pub fn capsule_sweep(
        &self,
        start: Vec3,
        end: Vec3,
        radius: f32,
        half_height: f32,
        filter: QueryFilter,
    ) -> TraceResult {
        let delta = end - start;
        let length = delta.length();
        if length <= f32::EPSILON {
            return TraceResult::miss();
        }
        let direction = delta / length;

        let shape = Capsule::new_y((half_height - radius).max(0.0), radius);
        let shape_pos = Isometry::translation(start.x, start.y, start.z);
        let options = ShapeCastOptions::with_max_time_of_impact(length);

        self.query_pipeline
            .cast_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &to_vector(direction),
                &shape,
                options,
                filter,
            )
            .map(|(_handle, hit)| {
                // The swept capsule is unrotated, so its local witness is a
                // plain offset from the capsule center at the time of impact
                let center = start + direction * hit.time_of_impact;
                let point = center + from_vector(&hit.witness2.coords);
                let normal = -from_vector(&hit.normal2);
                TraceResult::hit(point, normal, hit.time_of_impact)
            })
            .unwrap_or_else(TraceResult::miss)
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(position))
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    /// Create a static box tilted about the X axis, for ramps and slopes
    pub fn create_static_ramp(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        pitch_degrees: f32,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(position))
            .rotation(vector![pitch_degrees.to_radians(), 0.0, 0.0])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub(crate) fn to_point(v: Vec3) -> Point<Real> {
    point![v.x, v.y, v.z]
}

pub(crate) fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_ground() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        world.update_queries();
        world
    }

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec3::new(0.0, -980.0, 0.0));
    }

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        assert!(world.get_collider(ground).is_some());
    }

    #[test]
    fn test_line_trace_hits_ground() {
        let world = world_with_ground();
        let result = world.line_trace(
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(0.0, -100.0, 0.0),
            QueryFilter::default(),
        );
        assert!(result.hit);
        assert!((result.distance - 100.0).abs() < 0.01);
        assert!(result.point.y.abs() < 0.01);
        assert!((result.normal - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_line_trace_stops_at_end() {
        let world = world_with_ground();
        let result = world.line_trace(
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(0.0, 50.0, 0.0),
            QueryFilter::default(),
        );
        assert!(!result.hit);
    }

    #[test]
    fn test_line_trace_hits_wall_side() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(10.0, 200.0, 500.0), Vec3::new(60.0, 200.0, 0.0));
        world.update_queries();

        let result = world.line_trace(
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(75.0, 100.0, 0.0),
            QueryFilter::default(),
        );
        assert!(result.hit);
        assert!((result.distance - 50.0).abs() < 0.01);
        assert!((result.normal - Vec3::NEG_X).length() < 0.001);
    }

    #[test]
    fn test_capsule_sweep_lands_on_box_top() {
        let mut world = PhysicsWorld::new();
        // Top face at y = 100
        world.create_static_box(Vec3::new(100.0, 50.0, 100.0), Vec3::new(0.0, 50.0, 0.0));
        world.update_queries();

        let result = world.capsule_sweep(
            Vec3::new(0.0, 200.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            20.0,
            10.0,
            QueryFilter::default(),
        );
        assert!(result.hit);
        // Sphere of radius 20 touches the top at center height 120
        assert!((result.distance - 80.0).abs() < 0.1);
        assert!((result.point.y - 100.0).abs() < 0.1);
        assert!(result.normal.y > 0.99);
    }

    #[test]
    fn test_capsule_sweep_miss() {
        let world = world_with_ground();
        let result = world.capsule_sweep(
            Vec3::new(0.0, 200.0, 0.0),
            Vec3::new(0.0, 100.0, 0.0),
            20.0,
            10.0,
            QueryFilter::default(),
        );
        assert!(!result.hit);
        assert_eq!(result.distance, 0.0);
    }
}
