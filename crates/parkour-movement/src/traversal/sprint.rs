//! Sprinting

use super::{forward_input, Ability, MovementMode, TraversalController};
use crate::host::CharacterBody;

impl TraversalController {
    pub(crate) fn sprint_start(&mut self, body: &mut dyn CharacterBody) {
        self.crouch_end(body);
        self.slide_end(body, false);

        if self.mode != MovementMode::None || !body.is_walking() {
            return;
        }

        if self.request_mode(body, MovementMode::Sprint) {
            let speed = self.config.sprint.speed;
            self.update_params(body, |params| params.max_walk_speed = speed);
            self.enable(Ability::Sprint);
            self.intent.clear();
        }
    }

    pub(crate) fn sprint_update(&mut self, body: &mut dyn CharacterBody) {
        if !(self.mode == MovementMode::Sprint && forward_input(body)) {
            self.sprint_end(body);
        }
    }

    pub fn sprint_end(&mut self, body: &mut dyn CharacterBody) {
        if self.mode != MovementMode::Sprint {
            return;
        }

        if self.request_mode(body, MovementMode::None) {
            self.disable(Ability::Sprint);
        }
    }

    /// Leaving the ground mid-sprint keeps the wish to sprint for the landing
    pub fn sprint_jump(&mut self, body: &mut dyn CharacterBody) {
        if self.mode == MovementMode::Sprint {
            self.sprint_end(body);
            self.intent.wants_sprint = true;
        }
    }

    pub fn sprint_pressed(&mut self, body: &mut dyn CharacterBody) {
        self.sprint_start(body);
        if self.mode != MovementMode::Sprint {
            self.intent.wants_sprint = true;
        }
    }

    pub fn sprint_released(&mut self) {
        self.intent.wants_sprint = false;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use parkour_physics::Locomotion;

    use super::*;
    use crate::camera::CameraFeedbackConfig;
    use crate::config::TraversalConfig;
    use crate::test_support::{MockBody, DT};

    fn spawn(body: &MockBody) -> TraversalController {
        TraversalController::spawn(
            TraversalConfig::default(),
            CameraFeedbackConfig::default(),
            body,
        )
    }

    #[test]
    fn test_sprint_raises_walk_speed() {
        let mut body = MockBody::new();
        body.input_direction = Vec3::NEG_Z;
        let mut traversal = spawn(&body);

        traversal.sprint_pressed(&mut body);

        assert_eq!(traversal.mode(), MovementMode::Sprint);
        assert_eq!(body.params.max_walk_speed, 1000.0);
        assert!(traversal.gate(Ability::Sprint).enabled);
        assert!(!traversal.intent().wants_sprint);
    }

    #[test]
    fn test_sprint_from_crouch_stands_up() {
        let mut body = MockBody::new();
        let mut traversal = spawn(&body);
        traversal.crouch_start(&mut body);

        traversal.sprint_pressed(&mut body);

        assert_eq!(traversal.mode(), MovementMode::Sprint);
        assert!(!body.crouched);
    }

    #[test]
    fn test_sprint_in_air_is_queued() {
        let mut body = MockBody::new();
        body.locomotion = Locomotion::Falling;
        let mut traversal = spawn(&body);

        traversal.sprint_pressed(&mut body);
        assert_eq!(traversal.mode(), MovementMode::None);
        assert!(traversal.intent().wants_sprint);

        traversal.sprint_released();
        assert!(!traversal.intent().wants_sprint);
    }

    #[test]
    fn test_sprint_ends_without_forward_input() {
        let mut body = MockBody::new();
        body.input_direction = Vec3::NEG_Z;
        let mut traversal = spawn(&body);
        traversal.sprint_pressed(&mut body);
        traversal.tick(&mut body, DT);
        assert_eq!(traversal.mode(), MovementMode::Sprint);

        body.input_direction = Vec3::X;
        traversal.tick(&mut body, DT);

        assert_eq!(traversal.mode(), MovementMode::None);
        assert_eq!(body.params, traversal.baseline());
        assert!(!traversal.gate(Ability::Sprint).enabled);
    }

    #[test]
    fn test_sprint_jump_keeps_intent() {
        let mut body = MockBody::new();
        body.input_direction = Vec3::NEG_Z;
        let mut traversal = spawn(&body);
        traversal.sprint_pressed(&mut body);

        traversal.sprint_jump(&mut body);

        assert_eq!(traversal.mode(), MovementMode::None);
        assert!(traversal.intent().wants_sprint);
    }
}
