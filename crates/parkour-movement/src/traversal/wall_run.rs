//! Wall-running

use glam::Vec3;
use parkour_core::{interp_to, size_2d};
use tracing::trace;

use super::{moving_forward, Ability, MovementMode, TraversalController};
use crate::host::CharacterBody;

/// Which side a wall probe is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WallSide {
    Right,
    Left,
}

impl WallSide {
    /// Sign that turns `cross(normal, up)` into the direction of travel
    fn direction(self) -> f32 {
        match self {
            WallSide::Right => 1.0,
            WallSide::Left => -1.0,
        }
    }

    fn mode(self) -> MovementMode {
        match self {
            WallSide::Right => MovementMode::WallRunRight,
            WallSide::Left => MovementMode::WallRunLeft,
        }
    }

    fn opposite_mode(self) -> MovementMode {
        match self {
            WallSide::Right => MovementMode::WallRunLeft,
            WallSide::Left => MovementMode::WallRunRight,
        }
    }
}

/// Outcome of probing one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WallContact {
    /// Launched along a usable wall
    Running,
    /// The wall turned a corner and the run was ended
    Corner,
    NoWall,
}

impl TraversalController {
    /// Moving forward from no mode, or already on a wall
    pub fn can_wall_run(&self, body: &dyn CharacterBody) -> bool {
        (moving_forward(body) && self.mode == MovementMode::None) || self.mode.is_wall_running()
    }

    pub(crate) fn wall_run_update(&mut self, body: &mut dyn CharacterBody, dt: f32) {
        if !self.can_wall_run(body) {
            return;
        }

        let config = &self.config.wall_run;
        let location = body.location();
        let back = body.forward() * -config.back_offset;
        let side = body.right() * config.probe_length;
        let passes_speed = size_2d(body.velocity()) > config.speed_requirement;

        for (wall, end) in [
            (WallSide::Right, location + side + back),
            (WallSide::Left, location - side + back),
        ] {
            if !passes_speed || self.mode == wall.opposite_mode() {
                continue;
            }

            match self.wall_run_movement(body, location, end, wall) {
                WallContact::Running => {
                    self.request_mode(body, wall.mode());
                    let gravity = interp_to(
                        self.baseline.gravity_scale,
                        self.config.wall_run.gravity,
                        dt,
                        self.config.wall_run.gravity_interp_speed,
                    );
                    self.update_params(body, |params| params.gravity_scale = gravity);
                    return;
                }
                WallContact::Corner => return,
                WallContact::NoWall => {}
            }
        }

        if self.mode.is_wall_running() {
            let cooldown = self.config.wall_run.cooldown;
            self.wall_run_end(body, cooldown);
        }
    }

    fn wall_run_movement(
        &mut self,
        body: &mut dyn CharacterBody,
        start: Vec3,
        end: Vec3,
        wall: WallSide,
    ) -> WallContact {
        let hit = body.line_trace(start, end);
        trace!(?wall, hit = hit.hit, normal = ?hit.normal, "wall probe");
        if !hit.hit {
            return WallContact::NoWall;
        }

        let normal = hit.normal;
        let prev = self.prev_wall_run_normal;
        if prev.y != 0.0 && size_2d(prev - normal) > Vec3::splat(0.5).length() {
            let cooldown = self.config.wall_run.cooldown;
            self.wall_run_end(body, cooldown);
            return WallContact::Corner;
        }

        let band = self.config.wall_run.normal_band;
        if normal.y < band && normal.y > -band && body.is_falling() {
            let along = normal.cross(body.up());
            let speed = size_2d(body.velocity());
            body.launch(
                along * (wall.direction() * speed),
                true,
                !self.config.wall_run.gravity_on,
            );
            self.prev_wall_run_normal = normal;
            return WallContact::Running;
        }

        WallContact::NoWall
    }

    /// Drop off the wall and keep wall-running off for `cooldown` seconds
    pub fn wall_run_end(&mut self, body: &mut dyn CharacterBody, cooldown: f32) {
        self.request_mode(body, MovementMode::None);
        self.prev_wall_run_normal = Vec3::ZERO;
        let gravity = self.baseline.gravity_scale;
        self.update_params(body, |params| params.gravity_scale = gravity);
        self.disable(Ability::WallRun);
        self.schedule_recovery(Ability::WallRun, cooldown);
    }

    /// Kick off the wall, keeping the run direction and adding height
    pub fn wall_run_jump(&mut self, body: &mut dyn CharacterBody) {
        if !self.mode.is_wall_running() {
            return;
        }

        let cooldown = self.config.wall_run.jump_cooldown;
        self.wall_run_end(body, cooldown);

        let config = &self.config.wall_run;
        let velocity = body.velocity();
        body.launch(
            Vec3::new(
                config.jump_force * velocity.x,
                config.jump_height,
                config.jump_force * velocity.z,
            ),
            true,
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraFeedbackConfig;
    use crate::config::TraversalConfig;
    use crate::test_support::{MockBody, DT};
    use parkour_physics::{Locomotion, TraceResult};

    /// Falling forward (-Z) at 600 with wall-running enabled
    fn airborne() -> (MockBody, TraversalController) {
        let mut body = MockBody::new();
        body.locomotion = Locomotion::Falling;
        body.velocity = Vec3::new(0.0, -50.0, -600.0);
        let mut traversal = TraversalController::spawn(
            TraversalConfig::default(),
            CameraFeedbackConfig::default(),
            &body,
        );
        traversal.enable(Ability::WallRun);
        (body, traversal)
    }

    fn wall_on(body: &mut MockBody, right: bool, normal: Vec3) {
        body.set_line_trace(move |start, end| {
            let toward_right = end.x > start.x;
            if toward_right == right {
                TraceResult::hit(end, normal, 50.0)
            } else {
                TraceResult::miss()
            }
        });
    }

    #[test]
    fn test_starts_on_right_wall() {
        let (mut body, mut traversal) = airborne();
        wall_on(&mut body, true, Vec3::NEG_X);

        traversal.tick(&mut body, DT);

        assert_eq!(traversal.mode(), MovementMode::WallRunRight);
        let (velocity, override_xy, override_z) = body.launches[0];
        assert!((velocity - Vec3::new(0.0, 0.0, -600.0)).length() < 0.001);
        assert!(override_xy && override_z);
        // Half way from baseline toward 0.1 at 60 Hz and speed 30
        assert!((body.params.gravity_scale - 0.55).abs() < 0.001);
        assert_eq!(traversal.prev_wall_run_normal, Vec3::NEG_X);
    }

    #[test]
    fn test_starts_on_left_wall() {
        let (mut body, mut traversal) = airborne();
        wall_on(&mut body, false, Vec3::X);

        traversal.tick(&mut body, DT);

        assert_eq!(traversal.mode(), MovementMode::WallRunLeft);
        let (velocity, _, _) = body.launches[0];
        assert!((velocity - Vec3::new(0.0, 0.0, -600.0)).length() < 0.001);
    }

    #[test]
    fn test_needs_falling_and_vertical_wall() {
        let (mut body, mut traversal) = airborne();
        wall_on(&mut body, true, Vec3::new(-0.8, 0.6, 0.0));
        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::None);

        wall_on(&mut body, true, Vec3::NEG_X);
        body.locomotion = Locomotion::Walking;
        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::None);
        assert!(body.launches.is_empty());
    }

    #[test]
    fn test_speed_requirement_is_strict() {
        let (mut body, mut traversal) = airborne();
        traversal.config.wall_run.speed_requirement = 600.0;
        wall_on(&mut body, true, Vec3::NEG_X);

        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::None);
        assert!(body.launches.is_empty());

        body.velocity = Vec3::new(0.0, -50.0, -600.5);
        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::WallRunRight);
    }

    #[test]
    fn test_needs_forward_motion_to_start() {
        let (mut body, mut traversal) = airborne();
        body.velocity = Vec3::new(0.0, 0.0, 600.0);
        wall_on(&mut body, true, Vec3::NEG_X);

        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::None);
    }

    #[test]
    fn test_never_switches_to_opposite_side() {
        let (mut body, mut traversal) = airborne();
        traversal.request_mode(&mut body, MovementMode::WallRunLeft);
        wall_on(&mut body, true, Vec3::NEG_X);

        traversal.tick(&mut body, DT);

        // Right side skipped, left side empty: the run ends
        assert_eq!(traversal.mode(), MovementMode::None);
        assert!(body.launches.is_empty());
    }

    #[test]
    fn test_losing_the_wall_ends_with_cooldown() {
        let (mut body, mut traversal) = airborne();
        wall_on(&mut body, true, Vec3::NEG_X);
        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::WallRunRight);

        body.set_line_trace(|_, _| TraceResult::miss());
        traversal.tick(&mut body, DT);

        assert_eq!(traversal.mode(), MovementMode::None);
        assert_eq!(traversal.prev_wall_run_normal, Vec3::ZERO);
        assert_eq!(body.params.gravity_scale, 1.0);
        let gate = traversal.gate(Ability::WallRun);
        assert!(!gate.enabled);
        assert!((gate.cooldown_remaining - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_corner_guard_ends_run() {
        let (mut body, mut traversal) = airborne();
        traversal.request_mode(&mut body, MovementMode::WallRunRight);
        traversal.prev_wall_run_normal = Vec3::new(0.0, 0.3, 0.0);
        wall_on(&mut body, true, Vec3::new(0.9, 0.3, 0.0));

        traversal.tick(&mut body, DT);

        assert_eq!(traversal.mode(), MovementMode::None);
        assert_eq!(traversal.prev_wall_run_normal, Vec3::ZERO);
        assert!(body.launches.is_empty());
        assert!((traversal.gate(Ability::WallRun).cooldown_remaining - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_corner_guard_ignores_small_turns() {
        let (mut body, mut traversal) = airborne();
        traversal.request_mode(&mut body, MovementMode::WallRunRight);
        traversal.prev_wall_run_normal = Vec3::new(-1.0, 0.1, 0.0);
        wall_on(&mut body, true, Vec3::new(-0.9, 0.1, 0.3));

        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::WallRunRight);
    }

    #[test]
    fn test_wall_jump() {
        let (mut body, mut traversal) = airborne();
        wall_on(&mut body, true, Vec3::NEG_X);
        traversal.tick(&mut body, DT);
        body.launches.clear();

        traversal.wall_run_jump(&mut body);

        assert_eq!(traversal.mode(), MovementMode::None);
        let (velocity, override_xy, override_z) = body.launches[0];
        assert!((velocity - Vec3::new(0.0, 400.0, -660.0)).length() < 0.01);
        assert!(override_xy && override_z);
        assert!((traversal.gate(Ability::WallRun).cooldown_remaining - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_wall_jump_requires_wall_run() {
        let (mut body, mut traversal) = airborne();
        traversal.wall_run_jump(&mut body);
        assert!(body.launches.is_empty());
        assert!(traversal.gate(Ability::WallRun).enabled);
    }
}
