// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Software devices for running without attached hardware
//!
//! The daemon wires these up from the `simulate` tables in the config.
//! Real drivers implement the same traits out of tree.

use super::traits::{
    CapabilityError, InstrumentCapability, Reading, SensorCapability, TriggerError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// A sensor that serves the fixed readings from its config entry
pub struct SimulatedSensor {
    name: String,
    reading: Reading,
}

impl SimulatedSensor {
    pub fn new(name: impl Into<String>, reading: Reading) -> Self {
        Self {
            name: name.into(),
            reading,
        }
    }
}

#[async_trait]
impl SensorCapability for SimulatedSensor {
    fn readable(&self) -> bool {
        !self.reading.is_empty()
    }

    async fn read(&self) -> Result<Reading, CapabilityError> {
        if self.reading.is_empty() {
            return Err(CapabilityError::Unreadable);
        }
        tracing::debug!(sensor = %self.name, "serving simulated reading");
        Ok(self.reading.clone())
    }
}

/// A relay-style instrument that logs state transitions instead of
/// toggling GPIO
pub struct SimulatedInstrument {
    name: String,
    state: AtomicBool,
}

impl SimulatedInstrument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl InstrumentCapability for SimulatedInstrument {
    fn readable(&self) -> bool {
        true
    }

    fn state(&self) -> bool {
        self.state.load(Ordering::SeqCst)
    }

    async fn trigger(&self, state: Option<bool>) -> Result<bool, TriggerError> {
        // No explicit level requests the device's toggle behavior
        let next = state.unwrap_or(!self.state.load(Ordering::SeqCst));
        self.state.store(next, Ordering::SeqCst);
        info!(instrument = %self.name, state = next, "relay switched");
        Ok(next)
    }
}

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;
