// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval gate: the minimal scheduling primitive
//!
//! A gate is a stateful predicate that answers "has at least N seconds
//! elapsed since I last fired?". It is used standalone to pace sensor
//! polling and as the cooldown inside [`crate::ThresholdScheduler`].

use crate::clock::Clock;
use std::time::{Duration, Instant};

/// A fire-and-reset predicate that becomes true at most once per interval
///
/// Two observable states: armed (will fire on the next evaluation once the
/// interval has elapsed) and cooling down. A false evaluation never perturbs
/// state; `last_fire` only advances, and only on a true result. A freshly
/// constructed gate has never fired and is armed immediately.
#[derive(Debug, Clone)]
pub struct IntervalGate {
    interval: Duration,
    last_fire: Option<Instant>,
}

impl IntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    /// The configured cooldown interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the gate last fired, if ever
    pub fn last_fire(&self) -> Option<Instant> {
        self.last_fire
    }

    /// Fire if the interval has elapsed since the last firing
    ///
    /// Returns true and resets the cooldown when armed; otherwise returns
    /// false with no side effect.
    pub fn can_fire(&mut self, clock: &impl Clock) -> bool {
        let now = clock.now();
        let armed = match self.last_fire {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if armed {
            self.last_fire = Some(now);
        }
        armed
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
