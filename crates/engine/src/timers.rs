// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled stop events for timed instrument runs
//!
//! A timed run (fan or pump cycling for `run_secs`) is not a detached
//! worker: the orchestrator schedules a stop event here when the run starts
//! and drains due stops at the top of every tick. At most one stop is
//! pending per instrument; a second activation while one is pending is the
//! caller's overlap case to refuse.

use grove_core::clock::Clock;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

/// A pending stop for one instrument
#[derive(Debug, Clone)]
pub struct StopEvent {
    pub instrument: String,
    pub fire_at: Instant,
    /// Distinguishes a live entry from stale ones left by cancellation
    seq: u64,
}

impl PartialEq for StopEvent {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for StopEvent {}

impl PartialOrd for StopEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StopEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first
        Reverse(self.fire_at).cmp(&Reverse(other.fire_at))
    }
}

/// Owns the pending stop events for timed runs
#[derive(Debug, Default)]
pub struct StopTimers {
    items: BinaryHeap<StopEvent>,
    /// Instrument name to the seq of its live entry
    active: HashMap<String, u64>,
    next_seq: u64,
}

impl StopTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stop is already pending for the instrument
    pub fn is_pending(&self, instrument: &str) -> bool {
        self.active.contains_key(instrument)
    }

    /// Schedule a stop after the given run duration
    ///
    /// Returns false without scheduling when a stop is already pending for
    /// the instrument.
    pub fn schedule(&mut self, instrument: &str, run: Duration, clock: &impl Clock) -> bool {
        if self.active.contains_key(instrument) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.active.insert(instrument.to_string(), seq);
        self.items.push(StopEvent {
            instrument: instrument.to_string(),
            fire_at: clock.now() + run,
            seq,
        });
        true
    }

    /// Cancel the pending stop for an instrument, if any
    ///
    /// The heap entry stays behind but is skipped as stale when it surfaces.
    pub fn cancel(&mut self, instrument: &str) {
        self.active.remove(instrument);
    }

    /// Drain all stops due at or before now, earliest first
    pub fn poll(&mut self, now: Instant) -> Vec<StopEvent> {
        let mut due = Vec::new();

        while let Some(event) = self.items.peek() {
            if event.fire_at > now {
                break;
            }
            let Some(event) = self.items.pop() else {
                break;
            };

            if self.active.get(&event.instrument) != Some(&event.seq) {
                continue;
            }
            self.active.remove(&event.instrument);
            due.push(event);
        }

        due
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
