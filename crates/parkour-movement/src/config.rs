//! Traversal tuning
//!
//! Every distance is in world units (centimeters) and every duration in
//! seconds. Each group deserializes with defaults so a settings file only
//! needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Wall-run tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallRunConfig {
    /// Gravity scale while running along a wall
    pub gravity: f32,
    /// Re-enable delay after a wall run ends on its own
    pub cooldown: f32,
    /// Re-enable delay after jumping off a wall
    pub jump_cooldown: f32,
    /// Vertical speed of a wall jump
    pub jump_height: f32,
    /// Multiplier on horizontal velocity for a wall jump
    pub jump_force: f32,
    /// Horizontal speed that must be exceeded to start or keep running
    pub speed_requirement: f32,
    /// Keep vertical velocity while running instead of flattening it
    pub gravity_on: bool,
    /// Sideways reach of the wall probes
    pub probe_length: f32,
    /// How far behind the character the wall probes end
    pub back_offset: f32,
    /// Interpolation speed from baseline gravity toward wall-run gravity
    pub gravity_interp_speed: f32,
    /// Largest absolute vertical normal component still counted as a wall
    pub normal_band: f32,
    /// Re-enable delay after landing or leaving the ground
    pub landing_cooldown: f32,
}

impl Default for WallRunConfig {
    fn default() -> Self {
        Self {
            gravity: 0.10,
            cooldown: 0.75,
            jump_cooldown: 0.25,
            jump_height: 400.0,
            jump_force: 1.1,
            speed_requirement: 0.0,
            gravity_on: false,
            probe_length: 75.0,
            back_offset: 35.0,
            gravity_interp_speed: 30.0,
            normal_band: 0.52,
            landing_cooldown: 0.35,
        }
    }
}

/// Wall-climb tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallClimbConfig {
    /// Upward speed while climbing
    pub climb_speed: f32,
    /// Speed pressing the character into the wall
    pub inward_force: f32,
    /// Re-enable delay after a climb ends
    pub cooldown: f32,
    /// Extra forward reach of the climb trace past the feet origin
    pub forward_reach: f32,
}

impl Default for WallClimbConfig {
    fn default() -> Self {
        Self {
            climb_speed: 400.0,
            inward_force: 600.0,
            cooldown: 0.35,
            forward_reach: 50.0,
        }
    }
}

/// Ledge-grab and mantle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MantleConfig {
    /// Height above the capsule base of the low ledge probe origin
    pub height: f32,
    /// Pull-up interpolation speed
    pub speed: f32,
    /// Pull-up interpolation speed for a quick mantle
    pub quick_speed: f32,
    /// Delay before a slow ledge grab can be mantled
    pub check_delay: f32,
    /// Distance from the ledge at which the mantle finishes
    pub finish_distance: f32,
    /// Lift of the high ledge probe origin above the eyes
    pub eye_lift: f32,
    /// Forward offset of both ledge probe origins
    pub forward_offset: f32,
    /// Radius of the ledge sweep
    pub sweep_radius: f32,
    /// Half height of the ledge sweep
    pub sweep_half_height: f32,
    /// Re-enable delay for wall-climb after a finished mantle
    pub end_cooldown: f32,
    /// Interpolation speed turning the view toward the ledge
    pub look_interp_speed: f32,
    /// Horizontal speed of a jump off a ledge or climb
    pub ledge_jump_force: f32,
    /// Vertical speed of a jump off a ledge or climb
    pub ledge_jump_height: f32,
}

impl Default for MantleConfig {
    fn default() -> Self {
        Self {
            height: 40.0,
            speed: 10.0,
            quick_speed: 20.0,
            check_delay: 0.25,
            finish_distance: 8.0,
            eye_lift: 50.0,
            forward_offset: 50.0,
            sweep_radius: 20.0,
            sweep_half_height: 10.0,
            end_cooldown: 0.5,
            look_interp_speed: 7.0,
            ledge_jump_force: 300.0,
            ledge_jump_height: 400.0,
        }
    }
}

/// Slide and crouch tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Speed at or below which a slide ends in a crouch
    pub exit_speed: f32,
    /// Braking deceleration while sliding
    pub braking: f32,
    /// Downhill impulse applied when a slide starts on a slope
    pub impulse: f32,
    /// Length of the ground probe below the character
    pub ground_probe_depth: f32,
    /// Walk speed cap while crouched
    pub crouch_walk_speed: f32,
    /// Delay applied when crouching interrupts a wall or ledge state
    pub interrupt_cooldown: f32,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            exit_speed: 350.0,
            braking: 1400.0,
            impulse: 600.0,
            ground_probe_depth: 200.0,
            crouch_walk_speed: 300.0,
            interrupt_cooldown: 0.5,
        }
    }
}

/// Sprint tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintConfig {
    /// Walk speed cap while sprinting
    pub speed: f32,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self { speed: 1000.0 }
    }
}

/// All traversal tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub wall_run: WallRunConfig,
    pub wall_climb: WallClimbConfig,
    pub mantle: MantleConfig,
    pub slide: SlideConfig,
    pub sprint: SprintConfig,
}

impl TraversalConfig {
    /// Check the tuning for values the state machine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cooldowns = [
            ("wall_run.cooldown", self.wall_run.cooldown),
            ("wall_run.jump_cooldown", self.wall_run.jump_cooldown),
            ("wall_run.landing_cooldown", self.wall_run.landing_cooldown),
            ("wall_climb.cooldown", self.wall_climb.cooldown),
            ("mantle.check_delay", self.mantle.check_delay),
            ("mantle.end_cooldown", self.mantle.end_cooldown),
            ("slide.interrupt_cooldown", self.slide.interrupt_cooldown),
        ];
        for (name, value) in cooldowns {
            if value < 0.0 {
                return Err(ConfigError::NegativeCooldown { name, value });
            }
        }

        let speeds = [
            ("wall_run.gravity_interp_speed", self.wall_run.gravity_interp_speed),
            ("mantle.speed", self.mantle.speed),
            ("mantle.quick_speed", self.mantle.quick_speed),
            ("mantle.look_interp_speed", self.mantle.look_interp_speed),
        ];
        for (name, value) in speeds {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveSpeed { name, value });
            }
        }

        let band = self.wall_run.normal_band;
        if !(band > 0.0 && band <= 1.0) {
            return Err(ConfigError::InvalidNormalBand(band));
        }

        let distances = [
            ("wall_run.probe_length", self.wall_run.probe_length),
            ("mantle.sweep_radius", self.mantle.sweep_radius),
            ("mantle.finish_distance", self.mantle.finish_distance),
            ("slide.ground_probe_depth", self.slide.ground_probe_depth),
        ];
        for (name, value) in distances {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveDistance { name, value });
            }
        }

        Ok(())
    }
}
