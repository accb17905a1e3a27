// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler lanes: the decision primitives attached to devices
//!
//! A lane is one independent scheduler owned by exactly one device. Sensors
//! carry a bare interval lane that paces polling; instruments carry a
//! threshold lane driven by connected sensor readings, and optionally a
//! second free-running lane for periodic cycling. The lane kind is selected
//! once, from configuration.

use crate::budget::Budget;
use crate::clock::Clock;
use crate::comparison::ComparisonKind;
use crate::gate::IntervalGate;
use std::time::Instant;

/// Threshold-and-budget decision scheduler
///
/// Combines an interval gate (how often the instrument is re-examined), a
/// comparison rule against a sensor value, and a consumable daily budget
/// with an optional active window. Owned exclusively by one instrument lane.
#[derive(Debug, Clone)]
pub struct ThresholdScheduler {
    gate: IntervalGate,
    budget: Budget,
    comparison: ComparisonKind,
    threshold: f64,
}

impl ThresholdScheduler {
    pub fn new(
        gate: IntervalGate,
        budget: Budget,
        comparison: ComparisonKind,
        threshold: f64,
    ) -> Self {
        Self {
            gate,
            budget,
            comparison,
            threshold,
        }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn comparison(&self) -> ComparisonKind {
        self.comparison
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the instrument may be re-examined this tick
    ///
    /// Delegates to the interval gate: true at most once per interval.
    pub fn can_evaluate(&mut self, clock: &impl Clock) -> bool {
        self.gate.can_fire(clock)
    }

    /// Candidate next state for the instrument
    ///
    /// Outside the active window the instrument must not activate this
    /// cycle, regardless of the comparison, and the budget is untouched.
    /// Otherwise the comparison must hold and the budget must not be
    /// exhausted. Callers filter NaN and missing values before this point.
    pub fn decide(&self, value: f64, clock: &impl Clock) -> bool {
        if !self.budget.window_open(clock) {
            return false;
        }
        self.comparison.evaluate(self.threshold, value) && !self.budget.exhausted()
    }

    /// Update the budget ledger after a decision
    ///
    /// Called once per evaluation whether or not the decision activated the
    /// instrument.
    pub fn record_outcome(
        &mut self,
        new_state: bool,
        sensor_timestamp: Instant,
        clock: &impl Clock,
    ) {
        self.budget.record(new_state, sensor_timestamp, clock);
    }
}

/// One scheduler lane, selected at construction from configuration
#[derive(Debug, Clone)]
pub enum Lane {
    /// Free-standing poll gate (sensor sampling cadence)
    Interval(IntervalGate),
    /// Threshold-and-budget decision lane (instrument evaluation)
    Threshold(ThresholdScheduler),
}

impl Lane {
    /// The gate check shared by both lane kinds
    pub fn can_evaluate(&mut self, clock: &impl Clock) -> bool {
        match self {
            Lane::Interval(gate) => gate.can_fire(clock),
            Lane::Threshold(scheduler) => scheduler.can_evaluate(clock),
        }
    }

    pub fn as_threshold(&self) -> Option<&ThresholdScheduler> {
        match self {
            Lane::Threshold(scheduler) => Some(scheduler),
            Lane::Interval(_) => None,
        }
    }

    pub fn as_threshold_mut(&mut self) -> Option<&mut ThresholdScheduler> {
        match self {
            Lane::Threshold(scheduler) => Some(scheduler),
            Lane::Interval(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
