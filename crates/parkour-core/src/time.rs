//! Fixed timestep simulation time
//!
//! Movement runs at a fixed tick rate regardless of how often the host calls in.
//! Frame deltas accumulate and are paid out as whole fixed steps.

use serde::{Deserialize, Serialize};

/// Configuration for simulation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed simulation step (in seconds)
    pub fixed_timestep: f32,
    /// Maximum frame delta accepted in one update, to prevent a spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Simulation time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Simulated time since start in seconds
    pub total_time: f64,
    /// Scaled delta time for the last frame
    pub delta_time: f32,
    /// Number of fixed ticks paid out so far
    pub tick_count: u64,
    /// Whether the simulation is paused
    pub paused: bool,
    /// Time waiting to be paid out as fixed ticks
    fixed_accumulator: f32,
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The fixed step length in seconds
    pub fn fixed_timestep(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Feed in the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = raw_delta.min(self.config.max_delta_time) * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Take the number of fixed ticks to run this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let step = self.config.fixed_timestep;
        if step <= 0.0 {
            return 0;
        }

        let mut steps = 0;
        while self.fixed_accumulator >= step {
            self.fixed_accumulator -= step;
            steps += 1;
        }
        self.tick_count += steps as u64;
        steps
    }

    /// Interpolation factor between the last two fixed ticks
    pub fn fixed_interpolation(&self) -> f32 {
        self.fixed_accumulator / self.config.fixed_timestep
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        self.paused = false;
    }
}
