//! Parkour Core - Core types and utilities for the parkour movement workspace
//!
//! This crate provides the foundational types used by the physics and movement crates:
//! - Mathematical primitives (re-exported from glam)
//! - `Rotator` look rotations in degrees with wrap-around interpolation
//! - Frame-rate independent interpolation helpers
//! - Fixed timestep game time

pub mod math;
pub mod time;
pub mod types;

pub use glam::{Vec2, Vec3};
pub use math::{horizontal, interp_to, size_2d, vec_interp_to};
pub use time::{GameTime, TimeConfig};
pub use types::Rotator;
