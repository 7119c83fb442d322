//! Inputs remembered while the current mode blocks them

/// Slide and sprint requests waiting for the blocking mode to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueuedIntent {
    pub wants_slide: bool,
    pub wants_sprint: bool,
}

impl QueuedIntent {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        !self.wants_slide && !self.wants_sprint
    }
}
