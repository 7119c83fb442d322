//! Player controller module
//!
//! Drives a [`CharacterController`](parkour_physics::CharacterController)
//! through the traversal state machine from per-tick input.

mod body;
mod controller;

pub use body::PhysicsBody;
pub use controller::PlayerController;
