//! Trailing-edge debouncing driven by an injected clock.
//!
//! The host event loop calls [`Debouncer::schedule`] for every incoming
//! event and [`Debouncer::take_due`] whenever it wakes up. Work fires once the
//! key has been quiet for the whole delay.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Coalesces bursts of events per key into one firing.
#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    delay: Duration,
    deadlines: HashMap<K, Instant>,
}

impl<K: Copy + Eq + Hash + Ord> Debouncer<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadlines: HashMap::new(),
        }
    }

    /// Pushes the deadline for `key` to `now + delay`.
    pub fn schedule(&mut self, key: K, now: Instant) {
        self.deadlines.insert(key, now + self.delay);
    }

    /// Drops any pending firing for `key`.
    pub fn cancel(&mut self, key: K) {
        self.deadlines.remove(&key);
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.deadlines.contains_key(&key)
    }

    /// Removes and returns every key whose deadline has passed, in key order.
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<K> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        due.sort_unstable();

        for key in &due {
            self.deadlines.remove(key);
        }
        due
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay for events scheduled from now on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}
