// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup-time configuration errors
//!
//! Everything here is fatal: a controller with a malformed device tree must
//! not start. Per-tick failures live with the capability traits instead.

use thiserror::Error;

/// Errors raised while building devices and schedulers from configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown comparison kind: {0}")]
    UnknownComparison(String),
    #[error("unknown device type: {0}")]
    UnknownDeviceType(String),
    #[error("device {device}: time window needs both time_start and time_end")]
    HalfOpenWindow { device: String },
    #[error("device {device}: invalid time of day {value:?}: {source}")]
    InvalidTimeOfDay {
        device: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("device {device}: connection references unknown instrument {target}")]
    DanglingConnection { device: String, target: String },
    #[error("device {device}: connected instrument has no threshold lane")]
    MissingThresholdLane { device: String },
    #[error("device {device}: no capability handle of the right shape supplied")]
    MissingCapability { device: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
