// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumable daily runtime budget
//!
//! A budget tracks how many seconds an instrument has spent in its
//! accumulating state today. Scheduling refuses new activation once the
//! ledger reaches the ceiling; the ledger zeroes on the first record of a
//! new calendar day.

use crate::clock::Clock;
use crate::window::ActiveWindow;
use std::time::{Duration, Instant};

/// Daily allotment of seconds an instrument may hold its target state
///
/// The ceiling is a soft bound: decisions refuse activation once
/// `consumed >= ceiling`, but accrual that lands while the instrument is
/// already in the target state may push the ledger slightly over.
#[derive(Debug, Clone)]
pub struct Budget {
    ceiling: Duration,
    consumed: Duration,
    window: Option<ActiveWindow>,
    accumulation_target: bool,
    last_reset_day: chrono::NaiveDate,
}

impl Budget {
    pub fn new(
        ceiling: Duration,
        window: Option<ActiveWindow>,
        accumulation_target: bool,
        clock: &impl Clock,
    ) -> Self {
        Self {
            ceiling,
            consumed: Duration::ZERO,
            window,
            accumulation_target,
            last_reset_day: clock.today(),
        }
    }

    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }

    pub fn consumed(&self) -> Duration {
        self.consumed
    }

    pub fn window(&self) -> Option<&ActiveWindow> {
        self.window.as_ref()
    }

    pub fn accumulation_target(&self) -> bool {
        self.accumulation_target
    }

    /// Whether the ledger has reached the ceiling
    pub fn exhausted(&self) -> bool {
        self.consumed >= self.ceiling
    }

    /// Whether the wall clock is inside the active window, or no window is set
    pub fn window_open(&self, clock: &impl Clock) -> bool {
        self.window
            .map(|w| w.contains(clock.time_of_day()))
            .unwrap_or(true)
    }

    /// Update the ledger after an evaluation
    ///
    /// A day rollover is a hard reset point: the ledger zeroes and no accrual
    /// happens in the same call. Otherwise, elapsed seconds since the sensor
    /// reading's timestamp accrue when the window is open and the new state
    /// matches the accumulation target.
    pub fn record(&mut self, new_state: bool, sensor_timestamp: Instant, clock: &impl Clock) {
        let today = clock.today();
        if today != self.last_reset_day {
            self.consumed = Duration::ZERO;
            self.last_reset_day = today;
            return;
        }

        if self.window_open(clock) && new_state == self.accumulation_target {
            // Elapsed time is measured from the sensor reading's timestamp,
            // not this lane's previous evaluation.
            let elapsed = clock.now().saturating_duration_since(sensor_timestamp);
            self.consumed += elapsed;
        }
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
