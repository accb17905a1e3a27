// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Scheduling logic never reads the system clock directly. Everything that
//! needs "now" takes a [`Clock`], so gate and budget behavior is fully
//! deterministic under test.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides monotonic time plus the wall-clock calendar
pub trait Clock: Clone + Send + Sync {
    /// Monotonic instant, used for gate intervals and budget accrual
    fn now(&self) -> Instant;

    /// Current calendar day, used for daily budget resets
    fn today(&self) -> NaiveDate;

    /// Current local time of day, used for active-window checks
    fn time_of_day(&self) -> NaiveTime;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Fake clock for testing with controllable time
///
/// Advancing moves the monotonic instant and the wall clock in lockstep, so
/// interval gates and day rollovers can be exercised together.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeClockState>>,
}

struct FakeClockState {
    instant: Instant,
    wall: NaiveDateTime,
}

impl FakeClock {
    pub fn new() -> Self {
        let wall = NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap_or_default();
        Self::at(wall)
    }

    /// Create a fake clock with the given wall-clock start
    pub fn at(wall: NaiveDateTime) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeClockState {
                instant: Instant::now(),
                wall,
            })),
        }
    }

    /// Advance both the monotonic and wall clocks by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.instant += duration;
        state.wall += TimeDelta::from_std(duration).unwrap_or(TimeDelta::zero());
    }

    /// Set the wall clock without touching the monotonic instant
    pub fn set_wall(&self, wall: NaiveDateTime) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.wall = wall;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).instant
    }

    fn today(&self) -> NaiveDate {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .wall
            .date()
    }

    fn time_of_day(&self) -> NaiveTime {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .wall
            .time()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
