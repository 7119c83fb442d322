//! Deferred actions keyed by id
//!
//! Scheduling a key that is already pending replaces its timer, so a stale
//! re-enable from an earlier occurrence can never fire.

use std::fmt::Debug;

use tracing::debug;

/// Pending timers, one per key, fired in the order they were scheduled
#[derive(Debug, Clone)]
pub struct CooldownQueue<K> {
    entries: Vec<(K, f32)>,
}

impl<K> Default for CooldownQueue<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: Copy + PartialEq + Debug> CooldownQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `key` after `delay` seconds, replacing any pending timer for it.
    ///
    /// A non-positive delay only clears the pending timer.
    pub fn schedule(&mut self, key: K, delay: f32) {
        self.cancel(key);
        if delay <= 0.0 {
            debug!(?key, "cooldown cleared");
            return;
        }
        debug!(?key, delay, "cooldown scheduled");
        self.entries.push((key, delay));
    }

    /// Drop the pending timer for `key`, returning whether there was one
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(pending, _)| *pending != key);
        self.entries.len() != before
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.entries.iter().any(|(pending, _)| *pending == key)
    }

    /// Seconds left on the timer for `key`
    pub fn remaining(&self, key: K) -> Option<f32> {
        self.entries
            .iter()
            .find(|(pending, _)| *pending == key)
            .map(|(_, remaining)| *remaining)
    }

    /// Advance every timer and take the keys that came due
    pub fn advance(&mut self, dt: f32) -> Vec<K> {
        let mut fired = Vec::new();
        self.entries.retain_mut(|(key, remaining)| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                fired.push(*key);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
