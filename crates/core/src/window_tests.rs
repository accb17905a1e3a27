// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[parameterized(
    overnight_late_evening = { 22, 6, 23, 30, true },
    overnight_inclusive_end = { 22, 6, 6, 0, true },
    overnight_inclusive_start = { 22, 6, 22, 0, true },
    overnight_midday = { 22, 6, 12, 0, false },
    same_day_inside = { 6, 22, 12, 0, true },
    same_day_late_evening = { 6, 22, 23, 30, false },
    same_day_inclusive_start = { 6, 22, 6, 0, true },
    same_day_inclusive_end = { 6, 22, 22, 0, true },
    same_day_before = { 6, 22, 5, 59, false },
)]
fn containment(start_h: u32, end_h: u32, check_h: u32, check_m: u32, expected: bool) {
    let window = ActiveWindow::new(at(start_h, 0), at(end_h, 0));
    assert_eq!(window.contains(at(check_h, check_m)), expected);
}

#[test]
fn both_bounds_absent_means_no_window() {
    assert!(ActiveWindow::from_bounds("lamp", None, None)
        .unwrap()
        .is_none());
}

#[test]
fn both_bounds_present_builds_a_window() {
    let window = ActiveWindow::from_bounds("lamp", Some(at(22, 0)), Some(at(6, 0)))
        .unwrap()
        .unwrap();
    assert_eq!(window.start(), at(22, 0));
    assert_eq!(window.end(), at(6, 0));
}

#[test]
fn one_sided_window_is_a_config_error() {
    let err = ActiveWindow::from_bounds("lamp", Some(at(22, 0)), None).unwrap_err();
    assert!(matches!(err, ConfigError::HalfOpenWindow { device } if device == "lamp"));

    let err = ActiveWindow::from_bounds("lamp", None, Some(at(6, 0))).unwrap_err();
    assert!(matches!(err, ConfigError::HalfOpenWindow { .. }));
}
