// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring daily active window
//!
//! A window is a time-of-day range during which an instrument may activate.
//! Windows like 22:00-06:00 for lighting and venting cross midnight, so the
//! containment test has to branch on the orientation of the range.

use crate::error::ConfigError;
use chrono::NaiveTime;

/// A daily time-of-day range, possibly crossing midnight, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl ActiveWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Build from an optional pair of bounds
    ///
    /// Both absent means no window; exactly one present is a configuration
    /// error, not a default.
    pub fn from_bounds(
        device: &str,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    ) -> Result<Option<Self>, ConfigError> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => Ok(Some(Self::new(start, end))),
            _ => Err(ConfigError::HalfOpenWindow {
                device: device.to_string(),
            }),
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether the given time of day falls inside the window
    pub fn contains(&self, check: NaiveTime) -> bool {
        if self.start <= self.end {
            // Same-day window
            self.start <= check && check <= self.end
        } else {
            // Crosses midnight
            check >= self.start || check <= self.end
        }
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
