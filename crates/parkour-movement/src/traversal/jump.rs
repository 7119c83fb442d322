//! Jump input and ground contact changes

use tracing::debug;

use super::{Ability, Deferred, MovementMode, TraversalController};
use crate::events::FeedbackEvent;
use crate::host::CharacterBody;

impl TraversalController {
    /// Jump input: opens the airborne abilities from the ground, or jumps out
    /// of the current mode, then performs the body's own jump
    pub fn on_jump_pressed(&mut self, body: &mut dyn CharacterBody) {
        if self.mode == MovementMode::None {
            if !body.is_falling() {
                self.enable(Ability::WallRun);
                self.enable(Ability::WallClimb);
                self.enable(Ability::Sprint);
                self.enable(Ability::Slide);
                self.events.push(FeedbackEvent::Jumped);
            }
        } else {
            self.wall_run_jump(body);
            self.ledge_grab_jump(body);
            self.slide_jump(body);
            self.crouch_jump(body);
            self.sprint_jump(body);
        }

        body.jump();
    }

    /// The body walked off or jumped off the ground
    pub fn on_left_ground(&mut self, body: &mut dyn CharacterBody) {
        debug!(mode = ?self.mode, "left ground");
        self.enable(Ability::WallClimb);
        self.enable(Ability::Slide);
        self.enable(Ability::Sprint);
        self.sprint_jump(body);

        let wall_run = Deferred::Enable(Ability::WallRun);
        if !self.gates.is_enabled(Ability::WallRun) && !self.timers.is_pending(wall_run) {
            self.timers
                .schedule(wall_run, self.config.wall_run.landing_cooldown);
        }

        self.wall_climb_end(body, 0.0);
        self.slide_end(body, false);
    }

    /// The body touched down after falling
    pub fn on_landed(&mut self, body: &mut dyn CharacterBody) {
        debug!(mode = ?self.mode, "landed");
        self.disable(Ability::WallRun);
        self.disable(Ability::WallClimb);
        self.disable(Ability::Slide);
        self.disable(Ability::Sprint);

        self.slide_end(body, false);
        self.sprint_end(body);
        let cooldown = self.config.wall_run.landing_cooldown;
        self.wall_run_end(body, cooldown);
        self.wall_climb_end(body, 0.0);

        self.events.push(FeedbackEvent::Landed);
        self.replay_intent(body);
    }
}
