//! Demo course geometry and the scripted input that runs it

use glam::Vec3;
use parkour_movement::{InputAction, InputState};
use parkour_physics::PhysicsWorld;
use tracing::debug;

/// Feet position the player starts from, facing -Z
pub const START: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Build the course: flat ground, a wall to run along on the right, a ledge
/// at the end of it, and a ramp to slide down
pub fn build(physics: &mut PhysicsWorld) {
    physics.create_ground(0.0);

    // Wall face at x = 70, inside the 75 unit side probe from the capsule center
    physics.create_static_box(Vec3::new(10.0, 300.0, 500.0), Vec3::new(80.0, 300.0, -1100.0));

    // Ledge block across the path, top at 250
    physics.create_static_box(Vec3::new(400.0, 125.0, 100.0), Vec3::new(0.0, 125.0, -1800.0));

    // Ramp back down off the far side of the ledge
    physics.create_static_ramp(
        Vec3::new(400.0, 10.0, 400.0),
        Vec3::new(0.0, 120.0, -2250.0),
        -17.0,
    );

    physics.update_queries();
    debug!(colliders = physics.collider_set.len(), "course built");
}

/// One input change at a point in the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    /// Seconds since the run started
    pub at: f32,
    pub action: InputAction,
    pub pressed: bool,
}

impl ScriptEvent {
    const fn press(at: f32, action: InputAction) -> Self {
        Self { at, action, pressed: true }
    }

    const fn release(at: f32, action: InputAction) -> Self {
        Self { at, action, pressed: false }
    }
}

/// Input timeline fed into an [`InputState`] tick by tick
#[derive(Debug, Clone)]
pub struct Script {
    events: Vec<ScriptEvent>,
    next: usize,
}

impl Script {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events, next: 0 }
    }

    /// Apply every event due at `elapsed` seconds
    pub fn apply(&mut self, elapsed: f32, input: &mut InputState) {
        while let Some(event) = self.events.get(self.next) {
            if event.at > elapsed {
                break;
            }
            if event.pressed {
                input.press(event.action);
            } else {
                input.release(event.action);
            }
            debug!(?event, "scripted input");
            self.next += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }

    /// Time of the last event
    pub fn duration(&self) -> f32 {
        self.events.last().map_or(0.0, |event| event.at)
    }
}

/// Sprint at the wall, run along it, climb the ledge, then slide down the ramp
pub fn default_script() -> Vec<ScriptEvent> {
    use InputAction::*;

    vec![
        ScriptEvent::press(0.5, MoveForward),
        ScriptEvent::press(0.5, Sprint),
        // Jump toward the wall
        ScriptEvent::press(1.0, Jump),
        ScriptEvent::release(1.1, Jump),
        // Keep pushing forward into the ledge and climb it
        ScriptEvent::release(2.5, Sprint),
        ScriptEvent::press(4.0, Sprint),
        ScriptEvent::press(4.6, Crouch),
        ScriptEvent::release(4.7, Crouch),
        ScriptEvent::release(6.0, Sprint),
        ScriptEvent::release(6.5, MoveForward),
        ScriptEvent::press(7.0, Jump),
        ScriptEvent::release(7.1, Jump),
    ]
}
