// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(30));
}

#[test]
fn fake_clock_advances_wall_clock_in_lockstep() {
    let start = NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(23, 30, 0)
        .unwrap();
    let clock = FakeClock::at(start);
    assert_eq!(clock.today(), start.date());

    // Half an hour crosses midnight into the next day
    clock.advance(Duration::from_secs(30 * 60));
    assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    assert_eq!(clock.time_of_day(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
}

#[test]
fn fake_clock_set_wall_leaves_monotonic_alone() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    let noon_next = NaiveDate::from_ymd_opt(2026, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    clock.set_wall(noon_next);
    assert_eq!(clock.now(), t1);
    assert_eq!(clock.today(), noon_next.date());
}
