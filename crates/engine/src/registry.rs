// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static device tree and the sensor-to-instrument connection graph
//!
//! Built once at startup from configuration plus capability handles, then
//! owned by the orchestrator for the process lifetime. Lanes and observed
//! instrument state are the only mutable parts; the tree itself never
//! changes after build.

use grove_core::capability::{InstrumentCapability, SensorCapability};
use grove_core::clock::Clock;
use grove_core::config::{Config, DeviceKind};
use grove_core::error::ConfigError;
use grove_core::gate::IntervalGate;
use grove_core::scheduler::{Lane, ThresholdScheduler};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Capability handle supplied for one configured device
pub enum DeviceHandle {
    Sensor(Arc<dyn SensorCapability>),
    Instrument(Arc<dyn InstrumentCapability>),
}

/// A sensor and its polling lane
pub struct SensorEntry {
    pub name: String,
    pub kind: DeviceKind,
    pub capability: Arc<dyn SensorCapability>,
    /// Poll cadence gate
    pub lane: Lane,
    /// Downstream instruments re-evaluated from this sensor's readings
    pub connections: Vec<String>,
}

/// A free-running instrument lane plus its run duration
pub struct FreeRunLane {
    pub lane: Lane,
    /// How long each activation runs before the scheduled stop
    pub run: Duration,
}

/// An instrument, its lanes, and the state the orchestrator last observed
pub struct InstrumentEntry {
    pub name: String,
    pub kind: DeviceKind,
    pub capability: Arc<dyn InstrumentCapability>,
    /// Threshold lane, driven by connected sensors in phase 2
    pub threshold: Option<Lane>,
    /// Key into upstream readings for the threshold lane
    pub limiter_key: Option<String>,
    /// Free-running lane, evaluated in phase 3
    pub free_run: Option<FreeRunLane>,
    /// Observable state as of the last successful trigger
    pub state: bool,
}

impl InstrumentEntry {
    /// The threshold lane's scheduler, if the instrument has that lane
    pub fn threshold_scheduler_mut(&mut self) -> Option<&mut ThresholdScheduler> {
        self.threshold.as_mut().and_then(Lane::as_threshold_mut)
    }

    /// Whether the instrument runs a sensor-independent lane
    pub fn runs_alone(&self) -> bool {
        self.free_run.is_some()
    }
}

/// The static tree of sensors and instruments
///
/// Iteration order over each side is config (name) order; phase-1 queue
/// insertion follows sensor iteration order.
#[derive(Default)]
pub struct DeviceRegistry {
    sensors: Vec<SensorEntry>,
    instruments: Vec<InstrumentEntry>,
    instrument_index: HashMap<String, usize>,
}

// Capability handles are trait objects, so Debug lists device names only
impl fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field(
                "sensors",
                &self.sensors.iter().map(|s| &s.name).collect::<Vec<_>>(),
            )
            .field(
                "instruments",
                &self.instruments.iter().map(|i| &i.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl DeviceRegistry {
    /// Build and validate the tree
    ///
    /// Fails fast on unknown device types, missing capability handles,
    /// dangling connections, and connected instruments without a threshold
    /// lane. Whether a `limiter_key` actually appears in upstream readings
    /// is left to read time.
    pub fn build(
        config: &Config,
        mut handles: HashMap<String, DeviceHandle>,
        clock: &impl Clock,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::default();

        for (name, device) in &config.devices {
            let kind = device.kind()?;
            let handle = handles
                .remove(name)
                .ok_or_else(|| ConfigError::MissingCapability {
                    device: name.clone(),
                })?;

            match (kind.is_sensor(), handle) {
                (true, DeviceHandle::Sensor(capability)) => {
                    registry.sensors.push(SensorEntry {
                        name: name.clone(),
                        kind,
                        capability,
                        lane: Lane::Interval(IntervalGate::new(Duration::from_secs(
                            device.interval_secs,
                        ))),
                        connections: device.connections.clone(),
                    });
                }
                (false, DeviceHandle::Instrument(capability)) => {
                    let threshold = device
                        .threshold
                        .as_ref()
                        .map(|t| t.build(name, clock))
                        .transpose()?
                        .map(Lane::Threshold);
                    let limiter_key = device.threshold.as_ref().map(|t| t.limiter_key.clone());
                    let free_run = device
                        .free_run
                        .as_ref()
                        .map(|f| {
                            Ok::<_, ConfigError>(FreeRunLane {
                                lane: Lane::Threshold(f.build(name, clock)?),
                                run: f.run_duration(),
                            })
                        })
                        .transpose()?;

                    registry.instrument_index
                        .insert(name.clone(), registry.instruments.len());
                    registry.instruments.push(InstrumentEntry {
                        name: name.clone(),
                        kind,
                        capability,
                        threshold,
                        limiter_key,
                        free_run,
                        state: false,
                    });
                }
                _ => {
                    return Err(ConfigError::MissingCapability {
                        device: name.clone(),
                    });
                }
            }
        }

        registry.validate_connections()?;
        Ok(registry)
    }

    /// Every connection must name an existing instrument with a threshold lane
    fn validate_connections(&self) -> Result<(), ConfigError> {
        for sensor in &self.sensors {
            for target in &sensor.connections {
                let Some(&idx) = self.instrument_index.get(target) else {
                    return Err(ConfigError::DanglingConnection {
                        device: sensor.name.clone(),
                        target: target.clone(),
                    });
                };
                if self.instruments[idx].threshold.is_none() {
                    return Err(ConfigError::MissingThresholdLane {
                        device: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    pub fn sensor_mut(&mut self, idx: usize) -> Option<&mut SensorEntry> {
        self.sensors.get_mut(idx)
    }

    pub fn instrument_mut(&mut self, name: &str) -> Option<&mut InstrumentEntry> {
        let idx = *self.instrument_index.get(name)?;
        self.instruments.get_mut(idx)
    }

    pub fn instrument_at_mut(&mut self, idx: usize) -> Option<&mut InstrumentEntry> {
        self.instruments.get_mut(idx)
    }

    /// Read-only iteration, config order
    pub fn sensors(&self) -> impl Iterator<Item = &SensorEntry> {
        self.sensors.iter()
    }

    /// Read-only iteration, config order
    pub fn instruments(&self) -> impl Iterator<Item = &InstrumentEntry> {
        self.instruments.iter()
    }

    /// Connection lookup for one sensor
    pub fn connections(&self, sensor: &str) -> Option<&[String]> {
        self.sensors
            .iter()
            .find(|s| s.name == sensor)
            .map(|s| s.connections.as_slice())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
