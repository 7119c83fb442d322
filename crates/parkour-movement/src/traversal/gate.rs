//! Per-ability enable flags

use serde::{Deserialize, Serialize};

/// Abilities that can be switched off independently of the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    WallRun,
    WallClimb,
    /// Pull-up movement toward a grabbed ledge
    Mantle,
    /// Watching for the input that starts a mantle
    MantleCheck,
    Sprint,
    Slide,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::WallRun,
        Ability::WallClimb,
        Ability::Mantle,
        Ability::MantleCheck,
        Ability::Sprint,
        Ability::Slide,
    ];
}

/// Snapshot of one gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityGate {
    pub enabled: bool,
    /// Time until a scheduled re-enable, zero when none is pending
    pub cooldown_remaining: f32,
}

/// Enable flags for every ability, all disabled at spawn
#[derive(Debug, Clone, Default)]
pub struct AbilityGates {
    wall_run: bool,
    wall_climb: bool,
    mantle: bool,
    mantle_check: bool,
    sprint: bool,
    slide: bool,
}

impl AbilityGates {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag_mut(&mut self, ability: Ability) -> &mut bool {
        match ability {
            Ability::WallRun => &mut self.wall_run,
            Ability::WallClimb => &mut self.wall_climb,
            Ability::Mantle => &mut self.mantle,
            Ability::MantleCheck => &mut self.mantle_check,
            Ability::Sprint => &mut self.sprint,
            Ability::Slide => &mut self.slide,
        }
    }

    pub fn is_enabled(&self, ability: Ability) -> bool {
        match ability {
            Ability::WallRun => self.wall_run,
            Ability::WallClimb => self.wall_climb,
            Ability::Mantle => self.mantle,
            Ability::MantleCheck => self.mantle_check,
            Ability::Sprint => self.sprint,
            Ability::Slide => self.slide,
        }
    }

    pub fn set(&mut self, ability: Ability, enabled: bool) {
        *self.flag_mut(ability) = enabled;
    }
}
