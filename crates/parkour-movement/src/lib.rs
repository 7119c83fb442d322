//! Parkour Movement - Traversal state machine and player glue
//!
//! Layers wall-running, wall-climbing, ledge-grabbing, mantling, sliding,
//! crouching and sprinting on top of the capsule integrator in
//! `parkour-physics`. The [`TraversalController`] owns the movement mode and
//! ability gates and talks to the world only through [`CharacterBody`].

pub mod camera;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod input;
pub mod player;
pub mod traversal;

#[cfg(test)]
mod test_support;

pub use camera::{CameraConfig, CameraController, CameraFeedbackConfig, CameraShake};
pub use config::TraversalConfig;
pub use error::ConfigError;
pub use events::FeedbackEvent;
pub use host::CharacterBody;
pub use input::{InputAction, InputState};
pub use player::PlayerController;
pub use traversal::{
    Ability, AbilityGate, CooldownQueue, Deferred, MovementMode, QueuedIntent, TraversalController,
};
