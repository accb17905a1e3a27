// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::str::FromStr;
use yare::parameterized;

#[parameterized(
    less_below = { ComparisonKind::LessThan, 75.0, 80.0, true },
    less_above = { ComparisonKind::LessThan, 75.0, 70.0, false },
    less_boundary = { ComparisonKind::LessThan, 75.0, 75.0, false },
    greater_below = { ComparisonKind::GreaterThan, 75.0, 70.0, true },
    greater_above = { ComparisonKind::GreaterThan, 75.0, 80.0, false },
    greater_boundary = { ComparisonKind::GreaterThan, 75.0, 75.0, false },
    equal_match = { ComparisonKind::Equal, 75.0, 75.0, true },
    equal_mismatch = { ComparisonKind::Equal, 75.0, 75.5, false },
    not_equal_match = { ComparisonKind::NotEqual, 75.0, 75.0, false },
    not_equal_mismatch = { ComparisonKind::NotEqual, 75.0, 74.9, true },
)]
fn truth_table(kind: ComparisonKind, threshold: f64, value: f64, expected: bool) {
    assert_eq!(kind.evaluate(threshold, value), expected);
}

#[parameterized(
    less = { "less", ComparisonKind::LessThan },
    greater = { "greater", ComparisonKind::GreaterThan },
    equal = { "equal", ComparisonKind::Equal },
    not_equal = { "not_equal", ComparisonKind::NotEqual },
)]
fn parses_known_names(name: &str, expected: ComparisonKind) {
    assert_eq!(ComparisonKind::from_str(name).unwrap(), expected);
}

#[test]
fn unknown_name_is_a_config_error() {
    let err = ComparisonKind::from_str("at_least").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownComparison(name) if name == "at_least"));
}

#[test]
fn display_round_trips_through_from_str() {
    for kind in [
        ComparisonKind::LessThan,
        ComparisonKind::GreaterThan,
        ComparisonKind::Equal,
        ComparisonKind::NotEqual,
    ] {
        assert_eq!(ComparisonKind::from_str(&kind.to_string()).unwrap(), kind);
    }
}
