// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording fake capabilities for tests

use super::traits::{
    CapabilityError, InstrumentCapability, Reading, SensorCapability, TriggerError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A sensor that serves scripted readings and counts its reads
#[derive(Clone, Default)]
pub struct FakeSensor {
    inner: Arc<FakeSensorState>,
}

#[derive(Default)]
struct FakeSensorState {
    reading: Mutex<Reading>,
    readable: AtomicBool,
    fail_next: AtomicBool,
    reads: AtomicUsize,
}

impl FakeSensor {
    pub fn new(reading: Reading) -> Self {
        let sensor = Self::default();
        sensor.inner.readable.store(true, Ordering::SeqCst);
        sensor.set_reading(reading);
        sensor
    }

    pub fn with_metric(metric: &str, value: f64) -> Self {
        Self::new(Reading::from([(metric.to_string(), value)]))
    }

    pub fn set_reading(&self, reading: Reading) {
        *self.inner.reading.lock().unwrap_or_else(|e| e.into_inner()) = reading;
    }

    pub fn set_metric(&self, metric: &str, value: f64) {
        self.inner
            .reading
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(metric.to_string(), value);
    }

    pub fn set_readable(&self, readable: bool) {
        self.inner.readable.store(readable, Ordering::SeqCst);
    }

    /// Make the next read return an error
    pub fn fail_next_read(&self) {
        self.inner.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SensorCapability for FakeSensor {
    fn readable(&self) -> bool {
        self.inner.readable.load(Ordering::SeqCst)
    }

    async fn read(&self) -> Result<Reading, CapabilityError> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CapabilityError::ReadFailed("scripted failure".to_string()));
        }
        Ok(self
            .inner
            .reading
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }
}

/// An instrument that records every trigger it receives
#[derive(Clone, Default)]
pub struct FakeInstrument {
    inner: Arc<FakeInstrumentState>,
}

#[derive(Default)]
struct FakeInstrumentState {
    state: AtomicBool,
    fail_next: AtomicBool,
    triggers: Mutex<Vec<Option<bool>>>,
}

impl FakeInstrument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next trigger return an error
    pub fn fail_next_trigger(&self) {
        self.inner.fail_next.store(true, Ordering::SeqCst);
    }

    /// Every trigger argument received, in order
    pub fn triggers(&self) -> Vec<Option<bool>> {
        self.inner
            .triggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl InstrumentCapability for FakeInstrument {
    fn readable(&self) -> bool {
        true
    }

    fn state(&self) -> bool {
        self.inner.state.load(Ordering::SeqCst)
    }

    async fn trigger(&self, state: Option<bool>) -> Result<bool, TriggerError> {
        if self.inner.fail_next.swap(false, Ordering::SeqCst) {
            return Err(TriggerError::TriggerFailed("scripted failure".to_string()));
        }
        self.inner
            .triggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(state);
        let next = state.unwrap_or(!self.inner.state.load(Ordering::SeqCst));
        self.inner.state.store(next, Ordering::SeqCst);
        Ok(next)
    }
}
