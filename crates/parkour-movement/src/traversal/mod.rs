//! Traversal state machine
//!
//! One [`TraversalController`] per character owns the current
//! [`MovementMode`], the ability gates, the pending cooldowns and the queued
//! slide/sprint intent. Every fixed tick it fires due cooldowns, runs the
//! controller of each enabled ability, then eases the camera roll.
//!
//! Mode changes only happen through [`TraversalController::request_mode`].
//! Entering `None` or `Crouch` restores the baseline locomotion parameters
//! captured at spawn; every other mode applies its own overrides right after
//! the transition.

mod cooldown;
mod gate;
mod intent;
mod jump;
mod mode;
mod slide;
mod sprint;
mod wall_climb;
mod wall_run;

pub use cooldown::CooldownQueue;
pub use gate::{Ability, AbilityGate, AbilityGates};
pub use intent::QueuedIntent;
pub use mode::MovementMode;

use glam::Vec3;
use parkour_core::Rotator;
use parkour_physics::LocomotionParams;
use tracing::debug;

use crate::camera::{target_roll, CameraFeedbackConfig};
use crate::config::TraversalConfig;
use crate::events::FeedbackEvent;
use crate::host::CharacterBody;

/// Work deferred until a cooldown elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Switch an ability gate back on
    Enable(Ability),
    /// Retry a queued slide or sprint
    ReplayIntent,
}

/// Ledge found by the last wall-climb sweep
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Ledge {
    /// Capsule center to pull up to
    pub position: Vec3,
    /// How far the ledge sweep travelled before hitting
    pub trace_distance: f32,
}

/// Traversal state for one character
pub struct TraversalController {
    /// Tuning
    pub config: TraversalConfig,
    /// Camera roll tuning
    pub camera: CameraFeedbackConfig,
    mode: MovementMode,
    baseline: LocomotionParams,
    gates: AbilityGates,
    timers: CooldownQueue<Deferred>,
    intent: QueuedIntent,
    /// Wall normal from the previous wall-run tick, zero when not wall-running
    pub(crate) prev_wall_run_normal: Vec3,
    pub(crate) wall_climb_normal: Vec3,
    pub(crate) ledge: Ledge,
    events: Vec<FeedbackEvent>,
}

impl TraversalController {
    /// Create the traversal state for a freshly spawned body, capturing its
    /// current locomotion parameters as the baseline
    pub fn spawn(
        config: TraversalConfig,
        camera: CameraFeedbackConfig,
        body: &dyn CharacterBody,
    ) -> Self {
        let baseline = body.locomotion_params();
        debug!(?baseline, "traversal spawned");

        Self {
            config,
            camera,
            mode: MovementMode::None,
            baseline,
            gates: AbilityGates::new(),
            timers: CooldownQueue::new(),
            intent: QueuedIntent::default(),
            prev_wall_run_normal: Vec3::ZERO,
            wall_climb_normal: Vec3::ZERO,
            ledge: Ledge::default(),
            events: Vec::new(),
        }
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Locomotion parameters captured at spawn
    pub fn baseline(&self) -> LocomotionParams {
        self.baseline
    }

    pub fn intent(&self) -> QueuedIntent {
        self.intent
    }

    /// Current state of one ability gate
    pub fn gate(&self, ability: Ability) -> AbilityGate {
        AbilityGate {
            enabled: self.gates.is_enabled(ability),
            cooldown_remaining: self
                .timers
                .remaining(Deferred::Enable(ability))
                .unwrap_or(0.0),
        }
    }

    /// Whether a deferred action is waiting on its cooldown
    pub fn is_pending(&self, deferred: Deferred) -> bool {
        self.timers.is_pending(deferred)
    }

    /// Take the feedback events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch to `mode`, returning false when it is already active
    pub fn request_mode(&mut self, body: &mut dyn CharacterBody, mode: MovementMode) -> bool {
        if self.mode == mode {
            return false;
        }

        debug!(from = ?self.mode, to = ?mode, "movement mode changed");
        self.mode = mode;
        self.reset_to_baseline(body);
        true
    }

    /// Restore baseline physics when the current mode is `None` or `Crouch`
    pub fn reset_to_baseline(&mut self, body: &mut dyn CharacterBody) {
        if !self.mode.restores_baseline() {
            return;
        }

        body.set_locomotion_params(self.baseline);
        body.set_plane_constraint(None);
        if self.mode == MovementMode::None {
            body.set_crouched(false);
        }
        body.set_locomotion(self.mode.locomotion());
    }

    /// Run one fixed tick
    pub fn tick(&mut self, body: &mut dyn CharacterBody, dt: f32) {
        for deferred in self.timers.advance(dt) {
            match deferred {
                Deferred::Enable(ability) => self.enable(ability),
                Deferred::ReplayIntent => self.replay_intent(body),
            }
        }

        if self.gates.is_enabled(Ability::WallRun) {
            self.wall_run_update(body, dt);
        }
        if self.gates.is_enabled(Ability::WallClimb) {
            self.wall_climb_update(body);
        }
        if self.gates.is_enabled(Ability::MantleCheck) && self.mantle_check(body) {
            self.mantle_start(body);
        }
        if self.gates.is_enabled(Ability::Mantle) {
            self.mantle_movement(body, dt);
        }
        if self.gates.is_enabled(Ability::Sprint) {
            self.sprint_update(body);
        }
        if self.gates.is_enabled(Ability::Slide) {
            self.slide_update(body);
        }

        self.camera_tilt(body, dt);
    }

    /// Turn an ability on and drop any re-enable still waiting for it
    pub fn enable(&mut self, ability: Ability) {
        self.timers.cancel(Deferred::Enable(ability));
        if !self.gates.is_enabled(ability) {
            debug!(?ability, "ability enabled");
        }
        self.gates.set(ability, true);
    }

    /// Turn an ability off and drop any re-enable still waiting for it;
    /// wall-climb also stops any mantle in progress
    pub fn disable(&mut self, ability: Ability) {
        self.timers.cancel(Deferred::Enable(ability));
        if self.gates.is_enabled(ability) {
            debug!(?ability, "ability disabled");
        }
        self.gates.set(ability, false);
        if ability == Ability::WallClimb {
            self.disable(Ability::Mantle);
        }
    }

    /// Start the queued slide, or failing that the queued sprint, then forget both
    pub fn replay_intent(&mut self, body: &mut dyn CharacterBody) {
        if self.intent.wants_slide {
            self.slide_start(body);
        } else if self.intent.wants_sprint {
            self.sprint_start(body);
        }
        self.intent.clear();
    }

    /// Re-enable `ability` and replay queued intent once `cooldown` has passed
    fn schedule_recovery(&mut self, ability: Ability, cooldown: f32) {
        self.timers.schedule(Deferred::Enable(ability), cooldown);
        self.timers.schedule(Deferred::ReplayIntent, cooldown);
    }

    fn update_params(&self, body: &mut dyn CharacterBody, apply: impl FnOnce(&mut LocomotionParams)) {
        let mut params = body.locomotion_params();
        apply(&mut params);
        body.set_locomotion_params(params);
    }

    fn camera_tilt(&mut self, body: &mut dyn CharacterBody, dt: f32) {
        let current = body.look_rotation();
        let roll = target_roll(self.mode, &self.camera);
        let target = Rotator::new(current.pitch, current.yaw, roll);
        body.set_look_rotation(current.interp_to(target, dt, self.camera.tilt_interp_speed));
    }
}

/// Movement input points along the facing direction
pub(crate) fn forward_input(body: &dyn CharacterBody) -> bool {
    body.forward().dot(body.last_input_direction()) > 0.0
}

/// Velocity points along the facing direction
pub(crate) fn moving_forward(body: &dyn CharacterBody) -> bool {
    body.forward().dot(body.velocity().normalize_or_zero()) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockBody, DT};
    use parkour_physics::Locomotion;

    fn spawn(body: &MockBody) -> TraversalController {
        TraversalController::spawn(
            TraversalConfig::default(),
            CameraFeedbackConfig::default(),
            body,
        )
    }

    #[test]
    fn test_spawn_state() {
        let body = MockBody::new();
        let traversal = spawn(&body);
        assert_eq!(traversal.mode(), MovementMode::None);
        assert_eq!(traversal.baseline(), body.params);
        for ability in Ability::ALL {
            assert!(!traversal.gate(ability).enabled);
        }
        assert!(traversal.intent().is_empty());
    }

    #[test]
    fn test_request_mode_tracks_last_success() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);

        assert!(traversal.request_mode(&mut body, MovementMode::Sprint));
        assert_eq!(traversal.mode(), MovementMode::Sprint);
        assert!(traversal.request_mode(&mut body, MovementMode::Slide));
        assert_eq!(traversal.mode(), MovementMode::Slide);
    }

    #[test]
    fn test_request_same_mode_is_noop() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.request_mode(&mut body, MovementMode::Sprint);
        body.params.max_walk_speed = 1000.0;
        body.params.gravity_scale = 0.3;

        assert!(!traversal.request_mode(&mut body, MovementMode::Sprint));
        assert_eq!(body.params.max_walk_speed, 1000.0);
        assert_eq!(body.params.gravity_scale, 0.3);

        // Also for the modes that would otherwise restore the baseline
        traversal.request_mode(&mut body, MovementMode::None);
        body.params.ground_friction = 0.0;
        assert!(!traversal.request_mode(&mut body, MovementMode::None));
        assert_eq!(body.params.ground_friction, 0.0);
    }

    #[test]
    fn test_none_and_crouch_restore_baseline() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        let baseline = traversal.baseline();

        for (through, restore) in [
            (MovementMode::Slide, MovementMode::None),
            (MovementMode::WallRunLeft, MovementMode::Crouch),
        ] {
            traversal.request_mode(&mut body, through);
            body.params = LocomotionParams {
                gravity_scale: 0.1,
                ground_friction: 0.0,
                braking_deceleration_walking: 1400.0,
                max_walk_speed: 0.0,
                max_walk_speed_crouched: 10.0,
            };
            body.plane_constraint = Some(Vec3::X);
            body.locomotion = Locomotion::Falling;

            assert!(traversal.request_mode(&mut body, restore));
            assert_eq!(body.params, baseline);
            assert_eq!(body.plane_constraint, None);
            assert_eq!(body.locomotion, Locomotion::Walking);
        }
    }

    #[test]
    fn test_other_modes_keep_overrides() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        body.params.gravity_scale = 0.0;
        body.locomotion = Locomotion::None;

        assert!(traversal.request_mode(&mut body, MovementMode::Mantle));
        assert_eq!(body.params.gravity_scale, 0.0);
        assert_eq!(body.locomotion, Locomotion::None);
    }

    #[test]
    fn test_enable_cancels_pending_reenable() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.schedule_recovery(Ability::WallRun, 0.75);
        assert!((traversal.gate(Ability::WallRun).cooldown_remaining - 0.75).abs() < 1e-6);

        traversal.enable(Ability::WallRun);
        let gate = traversal.gate(Ability::WallRun);
        assert!(gate.enabled);
        assert_eq!(gate.cooldown_remaining, 0.0);

        // A later disable is not undone by the cancelled timer
        traversal.disable(Ability::WallRun);
        for _ in 0..60 {
            traversal.tick(&mut body, DT);
        }
        assert!(!traversal.gate(Ability::WallRun).enabled);
    }

    #[test]
    fn test_disable_cancels_pending_reenable() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.schedule_recovery(Ability::WallRun, 0.25);

        traversal.disable(Ability::WallRun);
        assert!(!traversal.is_pending(Deferred::Enable(Ability::WallRun)));
        assert_eq!(traversal.gate(Ability::WallRun).cooldown_remaining, 0.0);

        for _ in 0..60 {
            traversal.tick(&mut body, DT);
        }
        assert!(!traversal.gate(Ability::WallRun).enabled);
    }

    #[test]
    fn test_disable_then_recover_restarts_cooldown() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.schedule_recovery(Ability::WallClimb, 0.1);

        // Ending a climb disables first, then schedules its own recovery
        traversal.disable(Ability::WallClimb);
        traversal.schedule_recovery(Ability::WallClimb, 0.5);

        traversal.tick(&mut body, 0.25);
        assert!(!traversal.gate(Ability::WallClimb).enabled);
        traversal.tick(&mut body, 0.25);
        assert!(traversal.gate(Ability::WallClimb).enabled);
    }

    #[test]
    fn test_disabling_wall_climb_stops_mantle() {
        let body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.enable(Ability::WallClimb);
        traversal.enable(Ability::Mantle);

        traversal.disable(Ability::WallClimb);
        assert!(!traversal.gate(Ability::Mantle).enabled);
    }

    #[test]
    fn test_cooldown_reenables_on_tick() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.schedule_recovery(Ability::Sprint, 0.25);

        traversal.tick(&mut body, 0.125);
        assert!(!traversal.gate(Ability::Sprint).enabled);
        traversal.tick(&mut body, 0.125);
        assert!(traversal.gate(Ability::Sprint).enabled);
        assert!(!traversal.is_pending(Deferred::ReplayIntent));
    }

    #[test]
    fn test_camera_tilt_eases_toward_roll() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.request_mode(&mut body, MovementMode::WallRunLeft);

        traversal.tick(&mut body, DT);
        let roll = body.look.roll;
        assert!(roll > 0.0 && roll < 15.0);

        for _ in 0..120 {
            traversal.tick(&mut body, DT);
        }
        assert!((body.look.roll - 15.0).abs() < 0.01);
    }
}
