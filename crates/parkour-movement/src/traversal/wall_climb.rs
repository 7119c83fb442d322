//! Wall-climbing, ledge-grabbing and mantling

use glam::Vec3;
use parkour_core::{horizontal, vec_interp_to, Rotator};
use parkour_physics::{Locomotion, TraceResult};
use tracing::trace;

use super::{forward_input, Ability, Deferred, MovementMode, TraversalController};
use crate::events::FeedbackEvent;
use crate::host::CharacterBody;

impl TraversalController {
    /// Pushing forward while airborne, from no mode, a climb or a wall run
    pub fn can_wall_climb(&self, body: &dyn CharacterBody) -> bool {
        forward_input(body)
            && body.is_falling()
            && (matches!(self.mode, MovementMode::None | MovementMode::WallClimb)
                || self.mode.is_wall_running())
    }

    /// Origins of the ledge probe: above the eyes and just above the feet, both pushed forward
    fn ledge_probe_origins(&self, body: &dyn CharacterBody) -> (Vec3, Vec3) {
        let config = &self.config.mantle;
        let up = body.up();
        let ahead = body.forward() * config.forward_offset;

        let high = body.eye_location() + up * config.eye_lift + ahead;
        let low = body.location() - up * (body.capsule_half_height() - config.height) + ahead;
        (high, low)
    }

    pub(crate) fn wall_climb_update(&mut self, body: &mut dyn CharacterBody) {
        if !self.can_wall_climb(body) {
            let cooldown = self.config.wall_climb.cooldown;
            self.wall_climb_end(body, cooldown);
            return;
        }

        let (high, low) = self.ledge_probe_origins(body);
        let config = &self.config.mantle;
        let sweep = body.capsule_sweep(high, low, config.sweep_radius, config.sweep_half_height);
        trace!(hit = sweep.hit, distance = sweep.distance, "ledge sweep");

        if sweep.hit {
            self.ledge.trace_distance = sweep.distance;
            if body.is_walkable(sweep.normal) {
                self.ledge_grab(body, &sweep);
                return;
            }
        }

        self.wall_climb_movement(body, high, low);
    }

    fn ledge_grab(&mut self, body: &mut dyn CharacterBody, sweep: &TraceResult) {
        self.ledge.position = sweep.point + body.up() * body.capsule_half_height();
        self.disable(Ability::WallClimb);

        if !self.request_mode(body, MovementMode::LedgeGrab) {
            return;
        }

        body.set_locomotion(Locomotion::None);
        body.stop_movement();
        self.update_params(body, |params| params.gravity_scale = 0.0);
        self.events.push(FeedbackEvent::LedgeGrabbed);

        if self.quick_mantle(body) {
            self.enable(Ability::MantleCheck);
        } else {
            let delay = self.config.mantle.check_delay;
            self.timers
                .schedule(Deferred::Enable(Ability::MantleCheck), delay);
        }
    }

    fn wall_climb_movement(&mut self, body: &mut dyn CharacterBody, high: Vec3, low: Vec3) {
        let reach = body.forward() * self.config.wall_climb.forward_reach;
        let hit = if forward_input(body) {
            body.line_trace(high, low + reach)
        } else {
            TraceResult::miss()
        };

        if !hit.hit {
            let cooldown = self.config.wall_climb.cooldown;
            self.wall_climb_end(body, cooldown);
            return;
        }

        self.wall_climb_normal = hit.normal;
        self.request_mode(body, MovementMode::WallClimb);

        let config = &self.config.wall_climb;
        let normal = hit.normal;
        body.launch(
            Vec3::new(
                -normal.x * config.inward_force,
                config.climb_speed,
                -normal.z * config.inward_force,
            ),
            true,
            true,
        );
    }

    /// The ledge sweep travelled further than half the capsule, so the ledge is low
    pub fn quick_mantle(&self, body: &dyn CharacterBody) -> bool {
        self.ledge.trace_distance > body.capsule_half_height()
    }

    pub(crate) fn mantle_check(&self, body: &dyn CharacterBody) -> bool {
        forward_input(body) && (self.mode == MovementMode::LedgeGrab || self.quick_mantle(body))
    }

    pub(crate) fn mantle_start(&mut self, body: &mut dyn CharacterBody) {
        if !self.request_mode(body, MovementMode::Mantle) {
            return;
        }

        let quick = self.quick_mantle(body);
        self.events.push(FeedbackEvent::Mantled { quick });
        self.disable(Ability::MantleCheck);
        self.enable(Ability::Mantle);
    }

    pub(crate) fn mantle_movement(&mut self, body: &mut dyn CharacterBody, dt: f32) {
        let config = &self.config.mantle;
        let location = body.location();

        let facing = Rotator::facing(horizontal(self.ledge.position - location));
        let look = body
            .look_rotation()
            .interp_to(facing, dt, config.look_interp_speed);
        body.set_look_rotation(look);

        let speed = if self.quick_mantle(body) {
            config.quick_speed
        } else {
            config.speed
        };
        let moved = vec_interp_to(location, self.ledge.position, dt, speed);
        body.set_location(moved);

        if moved.distance(self.ledge.position) < config.finish_distance {
            let cooldown = config.end_cooldown;
            self.wall_climb_end(body, cooldown);
        }
    }

    /// Leave a climb, ledge grab or mantle and keep climbing off for `cooldown` seconds
    pub fn wall_climb_end(&mut self, body: &mut dyn CharacterBody, cooldown: f32) {
        if !self.mode.is_climbing() {
            return;
        }

        if self.request_mode(body, MovementMode::None) {
            self.disable(Ability::WallClimb);
            self.disable(Ability::MantleCheck);
            self.ledge.trace_distance = 0.0;
            self.schedule_recovery(Ability::WallClimb, cooldown);
        }
    }

    /// Push off a ledge or climb, away from the wall
    pub fn ledge_grab_jump(&mut self, body: &mut dyn CharacterBody) {
        if !self.mode.is_climbing() {
            return;
        }

        let cooldown = self.config.wall_climb.cooldown;
        self.wall_climb_end(body, cooldown);

        let config = &self.config.mantle;
        let normal = self.wall_climb_normal;
        body.launch(
            Vec3::new(
                normal.x * config.ledge_jump_force,
                config.ledge_jump_height,
                normal.z * config.ledge_jump_force,
            ),
            false,
            true,
        );
    }
}
