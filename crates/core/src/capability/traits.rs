// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability trait definitions

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Metric name to value, e.g. {"temperature": 24.5, "humidity": 0.55}
pub type Reading = HashMap<String, f64>;

/// Errors from sensor reads (recoverable, contained within a tick)
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("sensor not readable")]
    Unreadable,
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from instrument triggers (recoverable, per-instrument)
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("instrument not reachable")]
    Unreachable,
    #[error("trigger failed: {0}")]
    TriggerFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A pollable environmental sensor
#[async_trait]
pub trait SensorCapability: Send + Sync {
    /// Whether the sensor currently answers reads
    fn readable(&self) -> bool;

    /// Take one reading; keys are sensor-specific metric names
    async fn read(&self) -> Result<Reading, CapabilityError>;
}

/// A switchable instrument (fan, pump, light)
#[async_trait]
pub trait InstrumentCapability: Send + Sync {
    /// Whether the instrument currently answers commands
    fn readable(&self) -> bool;

    /// Last state the instrument acknowledged
    fn state(&self) -> bool;

    /// Command a state; `None` requests the device's own auto/timed
    /// behavior (typically a toggle). Returns the state actually applied.
    async fn trigger(&self, state: Option<bool>) -> Result<bool, TriggerError>;
}
