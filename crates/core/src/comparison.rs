// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison rules for threshold decisions

use crate::error::ConfigError;
use std::fmt;

/// How a threshold is compared against a sensor value
///
/// Validated exhaustively at construction; there is no string-keyed dispatch
/// at decision time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

impl ComparisonKind {
    /// Apply the operator with the threshold on the left-hand side
    ///
    /// `LessThan` reads as "threshold < value": an exhaust fan configured
    /// with `less` activates once the reading climbs above its threshold.
    pub fn evaluate(&self, threshold: f64, value: f64) -> bool {
        match self {
            ComparisonKind::LessThan => threshold < value,
            ComparisonKind::GreaterThan => threshold > value,
            ComparisonKind::Equal => threshold == value,
            ComparisonKind::NotEqual => threshold != value,
        }
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComparisonKind::LessThan => "less",
            ComparisonKind::GreaterThan => "greater",
            ComparisonKind::Equal => "equal",
            ComparisonKind::NotEqual => "not_equal",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ComparisonKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "less" => Ok(ComparisonKind::LessThan),
            "greater" => Ok(ComparisonKind::GreaterThan),
            "equal" => Ok(ComparisonKind::Equal),
            "not_equal" => Ok(ComparisonKind::NotEqual),
            other => Err(ConfigError::UnknownComparison(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "comparison_tests.rs"]
mod tests;
