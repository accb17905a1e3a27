// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use chrono::{NaiveDate, NaiveTime};

fn hour_budget(clock: &FakeClock) -> Budget {
    Budget::new(Duration::from_secs(3600), None, true, clock)
}

#[test]
fn fresh_budget_is_not_exhausted() {
    let clock = FakeClock::new();
    let budget = hour_budget(&clock);
    assert_eq!(budget.consumed(), Duration::ZERO);
    assert!(budget.accumulation_target());
    assert!(!budget.exhausted());
}

#[test]
fn accrues_when_state_matches_target() {
    let clock = FakeClock::new();
    let mut budget = hour_budget(&clock);

    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(30));
    budget.record(true, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::from_secs(30));
}

#[test]
fn no_accrual_when_state_differs_from_target() {
    let clock = FakeClock::new();
    let mut budget = hour_budget(&clock);

    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(30));
    budget.record(false, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::ZERO);
}

#[test]
fn no_accrual_outside_active_window() {
    // Window 06:00-22:00, clock currently at noon then moved to 23:00
    let clock = FakeClock::new();
    let window = ActiveWindow::new(
        NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    );
    let mut budget = Budget::new(Duration::from_secs(3600), Some(window), true, &clock);

    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(10));
    budget.record(true, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::from_secs(10));

    // Move to 23:00 the same day, past the window's end
    clock.advance(Duration::from_secs(11 * 3600));
    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(10));
    budget.record(true, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::from_secs(10));
}

#[test]
fn ceiling_is_a_soft_bound() {
    let clock = FakeClock::new();
    let mut budget = Budget::new(Duration::from_secs(60), None, true, &clock);

    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(90));
    budget.record(true, sensor_ts, &clock);

    // Accrual while already active may overshoot; exhaustion still reports
    assert_eq!(budget.consumed(), Duration::from_secs(90));
    assert!(budget.exhausted());
}

#[test]
fn day_rollover_resets_before_any_accrual() {
    let start = NaiveDate::from_ymd_opt(2026, 4, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let clock = FakeClock::at(start);
    let mut budget = hour_budget(&clock);

    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(1800));
    budget.record(true, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::from_secs(1800));

    // Cross into day D+1; the first record zeroes the ledger and skips
    // accrual in the same call, even with a large elapsed term pending.
    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(24 * 3600));
    budget.record(true, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::ZERO);

    // The call after the reset accrues normally again
    let sensor_ts = clock.now();
    clock.advance(Duration::from_secs(5));
    budget.record(true, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::from_secs(5));
}

#[test]
fn never_negative() {
    let clock = FakeClock::new();
    let mut budget = hour_budget(&clock);

    // A sensor timestamp "from the future" saturates to zero elapsed
    let sensor_ts = clock.now() + Duration::from_secs(100);
    budget.record(true, sensor_ts, &clock);
    assert_eq!(budget.consumed(), Duration::ZERO);
}
