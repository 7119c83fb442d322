//! Feedback events raised by the traversal core for the host to present

use serde::{Deserialize, Serialize};

/// Something the player should feel, queued until the host drains it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackEvent {
    /// Jumped off the ground
    Jumped,
    /// Touched down after falling
    Landed,
    /// Caught a ledge
    LedgeGrabbed,
    /// Started pulling up onto a ledge
    Mantled { quick: bool },
}
