//! Crouching and sliding

use tracing::trace;

use super::{moving_forward, Ability, MovementMode, TraversalController};
use crate::host::CharacterBody;

impl TraversalController {
    pub fn crouch_start(&mut self, body: &mut dyn CharacterBody) {
        if self.mode != MovementMode::None {
            return;
        }

        body.set_crouched(true);
        self.request_mode(body, MovementMode::Crouch);
        let speed = self.config.slide.crouch_walk_speed;
        self.update_params(body, |params| params.max_walk_speed = speed);
        self.intent.clear();
    }

    pub fn crouch_end(&mut self, body: &mut dyn CharacterBody) {
        if self.mode != MovementMode::Crouch {
            return;
        }

        body.set_crouched(false);
        self.request_mode(body, MovementMode::None);
        self.intent.clear();
    }

    /// Crouch input: interrupt a wall state into a queued slide, slide when
    /// sprinting on the ground, otherwise toggle the crouch
    pub fn crouch_or_slide(&mut self, body: &mut dyn CharacterBody) {
        let interrupt = self.config.slide.interrupt_cooldown;

        if self.mode.is_climbing() {
            self.wall_climb_end(body, interrupt);
            self.intent.wants_slide = true;
        } else if self.mode.is_wall_running() {
            self.wall_run_end(body, interrupt);
            self.intent.wants_slide = true;
        } else if !self.can_slide(body) {
            match self.mode {
                MovementMode::None => self.crouch_start(body),
                MovementMode::Crouch => self.crouch_end(body),
                _ => {}
            }
        } else if body.is_walking() {
            self.slide_start(body);
        } else {
            self.intent.wants_slide = true;
        }
    }

    /// Sprinting, or wanting to, while moving forward
    pub fn can_slide(&self, body: &dyn CharacterBody) -> bool {
        (self.mode == MovementMode::Sprint || self.intent.wants_sprint) && moving_forward(body)
    }

    pub(crate) fn slide_start(&mut self, body: &mut dyn CharacterBody) {
        if !(self.can_slide(body) && body.is_walking()) {
            return;
        }

        self.sprint_end(body);
        self.request_mode(body, MovementMode::Slide);
        body.set_crouched(true);

        let braking = self.config.slide.braking;
        self.update_params(body, |params| {
            params.ground_friction = 0.0;
            params.braking_deceleration_walking = braking;
            params.max_walk_speed = 0.0;
        });

        let up = body.up();
        let heading = body.velocity().normalize_or_zero();
        body.set_plane_constraint(Some(up.cross(heading)));

        let config = &self.config.slide;
        let location = body.location();
        let ground = body.line_trace(location, location - up * config.ground_probe_depth);
        if ground.hit {
            let normal = ground.normal;
            let downhill = up.cross(normal).cross(normal).try_normalize();
            trace!(?normal, ?downhill, "slide ground probe");
            // Only push when the slope runs the way the slide is heading
            if let Some(downhill) = downhill {
                if downhill.dot(heading) > 0.0 {
                    body.add_impulse(downhill * config.impulse, true);
                }
            }
        }

        self.enable(Ability::Slide);
        self.intent.clear();
    }

    pub(crate) fn slide_update(&mut self, body: &mut dyn CharacterBody) {
        if self.mode == MovementMode::Slide && body.velocity().length() <= self.config.slide.exit_speed {
            self.slide_end(body, true);
        }
    }

    /// Stop sliding, either into a crouch or standing up
    pub fn slide_end(&mut self, body: &mut dyn CharacterBody, crouch_after: bool) {
        if self.mode != MovementMode::Slide {
            return;
        }

        if crouch_after {
            body.set_crouched(true);
            self.request_mode(body, MovementMode::Crouch);
            let speed = self.config.slide.crouch_walk_speed;
            self.update_params(body, |params| params.max_walk_speed = speed);
        } else {
            self.request_mode(body, MovementMode::None);
            body.set_crouched(false);
        }
        self.disable(Ability::Slide);
    }

    pub fn slide_jump(&mut self, body: &mut dyn CharacterBody) {
        self.slide_end(body, false);
    }

    pub fn crouch_jump(&mut self, body: &mut dyn CharacterBody) {
        self.crouch_end(body);
    }
}
