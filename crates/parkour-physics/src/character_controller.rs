//! Character controller using rapier3d's kinematic character controller
//!
//! Velocity is integrated per locomotion mode (walking with friction and
//! braking, falling under scaled gravity with limited air control) and the
//! resulting translation is resolved against the world by rapier.

use glam::Vec3;
use parkour_core::math::horizontal;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{to_vector, PhysicsWorld};

/// Speeds below this while braking snap to a full stop
const BRAKE_TO_STOP_SPEED: f32 = 10.0;

/// Multiplier applied to ground friction while braking
const BRAKING_FRICTION_FACTOR: f32 = 2.0;

/// Underlying locomotion driven by the integrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locomotion {
    /// On walkable ground with friction and braking
    #[default]
    Walking,
    /// Airborne under gravity
    Falling,
    /// Free movement without gravity
    Flying,
    /// Movement suspended, velocity is not integrated
    None,
}

/// The tunable parameters that traversal modes override and restore
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionParams {
    /// Multiplier on world gravity while falling
    pub gravity_scale: f32,
    /// Ground friction while walking
    pub ground_friction: f32,
    /// Deceleration applied when braking on the ground
    pub braking_deceleration_walking: f32,
    /// Maximum walking speed
    pub max_walk_speed: f32,
    /// Maximum walking speed while crouched
    pub max_walk_speed_crouched: f32,
}

impl Default for LocomotionParams {
    fn default() -> Self {
        Self {
            gravity_scale: 1.0,
            ground_friction: 8.0,
            braking_deceleration_walking: 2048.0,
            max_walk_speed: 600.0,
            max_walk_speed_crouched: 300.0,
        }
    }
}

/// Character controller configuration (world units are centimeters)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterControllerConfig {
    /// Standing capsule height (default: 192)
    pub height: f32,
    /// Capsule radius (default: 55)
    pub radius: f32,
    /// Crouched capsule height (default: 120)
    pub crouched_height: f32,
    /// Maximum walkable slope angle in degrees
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 45)
    pub step_height: f32,
    /// Skin width for collision detection (default: 2)
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
    /// Distance of the eyes below the top of the capsule
    pub eye_offset: f32,
    /// Acceleration at full input
    pub max_acceleration: f32,
    /// Fraction of acceleration available in the air
    pub air_control: f32,
    /// Vertical speed of a standard jump
    pub jump_z_velocity: f32,
    /// Below this speed acceleration is full strength regardless of input magnitude
    pub quick_start_speed: f32,
    /// Acceleration used below `quick_start_speed`
    pub quick_start_acceleration: f32,
    /// Mass used to convert impulses into velocity
    pub mass: f32,
    /// Baseline locomotion parameters
    pub params: LocomotionParams,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            height: 192.0,
            radius: 55.0,
            crouched_height: 120.0,
            max_slope_angle: 44.765,
            step_height: 45.0,
            skin_width: 2.0,
            snap_to_ground: true,
            ground_snap_distance: 20.0,
            eye_offset: 32.0,
            max_acceleration: 2048.0,
            air_control: 0.05,
            jump_z_velocity: 420.0,
            quick_start_speed: 700.0,
            quick_start_acceleration: 2048.0,
            mass: 100.0,
            params: LocomotionParams::default(),
        }
    }
}

/// Transitions reported by one [`CharacterController::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocomotionEvents {
    /// Touched walkable ground while falling
    pub landed: bool,
    /// Went from walking to falling (jump, launch or walking off an edge)
    pub left_ground: bool,
}

/// Character controller for player movement with collision
pub struct CharacterController {
    /// Configuration
    pub config: CharacterControllerConfig,
    /// Current live locomotion parameters
    pub params: LocomotionParams,
    /// Current position (bottom of the capsule)
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Whether the character is on the ground
    pub grounded: bool,
    /// The collider handle for this character
    pub collider_handle: Option<ColliderHandle>,
    locomotion: Locomotion,
    reported_locomotion: Locomotion,
    move_input: Vec3,
    crouched: bool,
    wants_crouch: bool,
    plane_constraint: Option<Vec3>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterController {
    /// Create a new character controller with default config
    pub fn new() -> Self {
        Self::with_config(CharacterControllerConfig::default())
    }

    /// Create a new character controller with custom config
    pub fn with_config(config: CharacterControllerConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            params: config.params,
            config,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            locomotion: Locomotion::Walking,
            reported_locomotion: Locomotion::Walking,
            move_input: Vec3::ZERO,
            crouched: false,
            wants_crouch: false,
            plane_constraint: None,
            controller,
        }
    }

    /// Spawn the character in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.crouched = false;
        self.wants_crouch = false;

        let collider = ColliderBuilder::new(self.capsule_shape(self.config.height))
            .translation(to_vector(self.center_position()))
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        physics.update_queries();
        handle
    }

    fn capsule_shape(&self, height: f32) -> SharedShape {
        let half_segment = (height / 2.0 - self.config.radius).max(0.01);
        SharedShape::capsule_y(half_segment, self.config.radius)
    }

    /// Height of the capsule in its current crouch state
    pub fn current_height(&self) -> f32 {
        if self.crouched {
            self.config.crouched_height
        } else {
            self.config.height
        }
    }

    /// Half the current capsule height
    pub fn capsule_half_height(&self) -> f32 {
        self.current_height() / 2.0
    }

    /// Get the eye position
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.current_height() - self.config.eye_offset)
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.capsule_half_height()
    }

    /// Check if standing on ground
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    /// Switch the underlying locomotion
    pub fn set_locomotion(&mut self, locomotion: Locomotion) {
        if locomotion == Locomotion::Walking && self.locomotion != Locomotion::Walking {
            self.velocity.y = 0.0;
        }
        self.locomotion = locomotion;
    }

    pub fn is_falling(&self) -> bool {
        self.locomotion == Locomotion::Falling
    }

    pub fn is_walking(&self) -> bool {
        self.locomotion == Locomotion::Walking
    }

    pub fn is_crouched(&self) -> bool {
        self.crouched
    }

    /// Set the world-space movement input for the next update (length at most 1)
    pub fn set_move_input(&mut self, input: Vec3) {
        self.move_input = horizontal(input).clamp_length_max(1.0);
    }

    /// The movement input given for the current update
    pub fn move_input(&self) -> Vec3 {
        self.move_input
    }

    /// Launch the character, replacing or adding to each part of the velocity
    pub fn launch(&mut self, launch_velocity: Vec3, override_xy: bool, override_z: bool) {
        let mut velocity = launch_velocity;
        if !override_xy {
            velocity.x += self.velocity.x;
            velocity.z += self.velocity.z;
        }
        if !override_z {
            velocity.y += self.velocity.y;
        }
        self.velocity = velocity;
        self.locomotion = Locomotion::Falling;
    }

    /// Apply an impulse, either as a raw velocity change or scaled by mass
    pub fn add_impulse(&mut self, impulse: Vec3, velocity_change: bool) {
        if velocity_change {
            self.velocity += impulse;
        } else if self.config.mass > 0.0 {
            self.velocity += impulse / self.config.mass;
        }
    }

    /// Zero the velocity immediately
    pub fn stop_movement(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// Perform a standard jump; only possible while walking
    pub fn jump(&mut self) -> bool {
        if self.locomotion != Locomotion::Walking {
            return false;
        }
        self.velocity.y = self.config.jump_z_velocity;
        self.locomotion = Locomotion::Falling;
        true
    }

    /// Request the crouched or standing capsule; standing up waits for headroom
    pub fn set_crouched(&mut self, crouched: bool) {
        self.wants_crouch = crouched;
    }

    /// Constrain movement to the plane with this normal, or lift the constraint
    pub fn set_plane_constraint(&mut self, normal: Option<Vec3>) {
        self.plane_constraint = normal.and_then(|n| n.try_normalize());
    }

    pub fn plane_constraint(&self) -> Option<Vec3> {
        self.plane_constraint
    }

    /// Whether a surface with this normal can be stood on
    pub fn is_walkable(&self, normal: Vec3) -> bool {
        normal.y >= self.config.max_slope_angle.to_radians().cos() - 1.0e-4
    }

    /// Maximum ground speed for the current crouch state
    pub fn max_speed(&self) -> f32 {
        if self.crouched {
            self.params.max_walk_speed_crouched
        } else {
            self.params.max_walk_speed
        }
    }

    fn apply_crouch_state(&mut self, physics: &mut PhysicsWorld, handle: ColliderHandle) {
        if self.wants_crouch == self.crouched {
            return;
        }

        let target_height = if self.wants_crouch {
            self.config.crouched_height
        } else {
            self.config.height
        };
        let shape = self.capsule_shape(target_height);
        let center = self.position + Vec3::Y * (target_height / 2.0);

        if !self.wants_crouch {
            let pos = Isometry::translation(center.x, center.y + self.config.skin_width, center.z);
            let blocked = physics.query_pipeline.intersection_with_shape(
                &physics.rigid_body_set,
                &physics.collider_set,
                &pos,
                &*shape,
                QueryFilter::default().exclude_collider(handle),
            );
            if blocked.is_some() {
                return;
            }
        }

        if let Some(collider) = physics.collider_set.get_mut(handle) {
            collider.set_shape(shape);
            collider.set_translation(to_vector(center));
        }
        self.crouched = self.wants_crouch;
        debug!(crouched = self.crouched, "capsule resized");
    }

    fn calc_walking_velocity(&mut self, dt: f32) {
        let max_speed = self.max_speed();
        let friction = self.params.ground_friction;
        let mut velocity = horizontal(self.velocity);

        let analog = self.move_input.length();
        let accel_dir = self.move_input.normalize_or_zero();
        let zero_acceleration = analog <= 0.0;
        let over_max = velocity.length() > max_speed;

        if zero_acceleration || over_max {
            let before = velocity;
            velocity = Self::brake(
                velocity,
                friction * BRAKING_FRICTION_FACTOR,
                self.params.braking_deceleration_walking,
                dt,
            );
            // Input along the motion keeps the speed from dropping under the cap
            if over_max
                && !zero_acceleration
                && velocity.length() < max_speed
                && before.dot(accel_dir) > 0.0
            {
                velocity = velocity.normalize_or_zero() * max_speed;
            }
        }

        if !zero_acceleration {
            let speed = velocity.length();
            let limit = speed.max(max_speed);
            velocity -= (velocity - accel_dir * speed) * (friction * dt).min(1.0);

            let acceleration = if speed < self.config.quick_start_speed {
                self.config.quick_start_acceleration
            } else {
                self.config.max_acceleration * analog
            };
            velocity = (velocity + accel_dir * acceleration * dt).clamp_length_max(limit);
        }

        self.velocity = Vec3::new(velocity.x, 0.0, velocity.z);
    }

    fn calc_falling_velocity(&mut self, gravity: Vec3, dt: f32) {
        let mut velocity = horizontal(self.velocity);
        let speed = velocity.length();
        let accel = self.move_input * self.config.max_acceleration * self.config.air_control;
        velocity = (velocity + accel * dt).clamp_length_max(speed.max(self.max_speed()));

        let vertical = self.velocity.y + gravity.y * self.params.gravity_scale * dt;
        self.velocity = Vec3::new(velocity.x, vertical, velocity.z);
    }

    fn brake(velocity: Vec3, friction: f32, deceleration: f32, dt: f32) -> Vec3 {
        if velocity == Vec3::ZERO || (friction == 0.0 && deceleration == 0.0) {
            return velocity;
        }

        let reverse = -velocity.normalize_or_zero() * deceleration;
        let braked = velocity + (-friction * velocity + reverse) * dt;

        if braked.dot(velocity) <= 0.0 || braked.length() < BRAKE_TO_STOP_SPEED {
            Vec3::ZERO
        } else {
            braked
        }
    }

    /// Move the character with collision detection, returning the applied translation
    pub fn move_character(
        &mut self,
        physics: &mut PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> Vec3 {
        let Some(collider_handle) = self.collider_handle else {
            return Vec3::ZERO;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return Vec3::ZERO;
        };

        self.controller.snap_to_ground =
            if self.config.snap_to_ground && self.locomotion == Locomotion::Walking {
                Some(CharacterLength::Absolute(self.config.ground_snap_distance))
            } else {
                None
            };

        let shape = collider.shape();
        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            shape,
            &current_pos,
            to_vector(desired_translation),
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        self.grounded = movement.grounded;

        let translation = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.position += translation;

        let center = self.center_position();
        if let Some(collider) = physics.collider_set.get_mut(collider_handle) {
            collider.set_translation(to_vector(center));
        }

        translation
    }

    /// Gap between the bottom of the capsule and the floor below it, when the
    /// floor is within ground snap range
    fn find_floor(&self, physics: &PhysicsWorld, handle: ColliderHandle) -> Option<f32> {
        let reach = self.config.ground_snap_distance + self.config.skin_width;
        let center = self.center_position();
        let hit = physics.capsule_sweep(
            center,
            center - Vec3::Y * reach,
            self.config.radius,
            self.capsule_half_height(),
            QueryFilter::default().exclude_collider(handle),
        );
        hit.hit.then_some(hit.distance)
    }

    /// Drop onto the floor found by [`Self::find_floor`], keeping the skin gap
    fn snap_to_floor(&mut self, physics: &mut PhysicsWorld, handle: ColliderHandle, gap: f32) {
        let drop = gap - self.config.skin_width;
        if drop <= 0.0 {
            return;
        }

        self.position.y -= drop;
        let center = self.center_position();
        if let Some(collider) = physics.collider_set.get_mut(handle) {
            collider.set_translation(to_vector(center));
        }
    }

    /// Integrate velocity for the current locomotion and move the character
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) -> LocomotionEvents {
        let mut events = LocomotionEvents::default();
        let Some(handle) = self.collider_handle else {
            return events;
        };

        self.apply_crouch_state(physics, handle);

        let gravity = physics.config.gravity;
        match self.locomotion {
            Locomotion::Walking => self.calc_walking_velocity(dt),
            Locomotion::Falling => self.calc_falling_velocity(gravity, dt),
            Locomotion::Flying => {}
            Locomotion::None => self.velocity = Vec3::ZERO,
        }

        if let Some(normal) = self.plane_constraint {
            self.velocity -= normal * self.velocity.dot(normal);
        }

        if self.locomotion != Locomotion::None && dt > 0.0 {
            let desired = self.velocity * dt;
            let translation = self.move_character(physics, desired, dt);

            // Blocked horizontal motion bleeds off velocity
            self.velocity.x = translation.x / dt;
            self.velocity.z = translation.z / dt;

            // The controller only reports ground it was pushed against, so
            // look for a floor within snap range before leaving the ground
            let settling = match self.locomotion {
                Locomotion::Walking => true,
                Locomotion::Falling => self.velocity.y <= 0.0,
                _ => false,
            };
            if settling && !self.grounded {
                if let Some(gap) = self.find_floor(physics, handle) {
                    self.snap_to_floor(physics, handle, gap);
                    self.grounded = true;
                }
            }

            match self.locomotion {
                Locomotion::Walking if !self.grounded => {
                    self.locomotion = Locomotion::Falling;
                }
                Locomotion::Falling => {
                    if self.grounded && self.velocity.y <= 0.0 {
                        self.locomotion = Locomotion::Walking;
                        self.velocity.y = 0.0;
                        events.landed = true;
                    } else if self.velocity.y > 0.0 && translation.y < desired.y * 0.5 {
                        self.velocity.y = 0.0;
                    }
                }
                _ => {}
            }
        }

        events.left_ground = self.reported_locomotion == Locomotion::Walking
            && self.locomotion == Locomotion::Falling;
        self.reported_locomotion = self.locomotion;

        if events.landed || events.left_ground {
            debug!(?events, position = ?self.position, "locomotion changed");
        }

        events
    }

    /// Set the character's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;

        if let Some(handle) = self.collider_handle {
            let center = self.center_position();
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_translation(to_vector(center));
            }
        }
    }

    /// Move the capsule so its center sits at `center`
    pub fn set_center_position(&mut self, physics: &mut PhysicsWorld, center: Vec3) {
        let feet = center - Vec3::Y * self.capsule_half_height();
        self.set_position(physics, feet);
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}
