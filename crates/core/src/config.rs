// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller configuration
//!
//! The device tree is read once at startup from TOML. Sensors declare a poll
//! cadence and their downstream connections; instruments declare a threshold
//! lane and optionally a free-running lane. Scheduler construction validates
//! comparisons, device types, and window bounds fail-fast.

use crate::budget::Budget;
use crate::clock::Clock;
use crate::comparison::ComparisonKind;
use crate::error::ConfigError;
use crate::gate::IntervalGate;
use crate::scheduler::ThresholdScheduler;
use crate::window::ActiveWindow;
use chrono::NaiveTime;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level controller configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Sleep between ticks
    #[serde(with = "humantime_serde", default = "default_tick_interval")]
    pub tick_interval: Duration,
    /// Where the daemon writes its log
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Device tree, keyed by device name (name order is iteration order)
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceConfig>,
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_log_path() -> PathBuf {
    PathBuf::from("groved.log")
}

impl Config {
    /// Load and parse a TOML config file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// The kind of device a config entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    TemperatureSensor,
    LightSensor,
    SoilSensor,
    Camera,
    Light,
    Water,
    Fan,
}

impl DeviceKind {
    pub fn is_sensor(&self) -> bool {
        matches!(
            self,
            DeviceKind::TemperatureSensor
                | DeviceKind::LightSensor
                | DeviceKind::SoilSensor
                | DeviceKind::Camera
        )
    }

    pub fn is_instrument(&self) -> bool {
        !self.is_sensor()
    }

    /// Cameras emit image records instead of generic log records
    pub fn is_camera(&self) -> bool {
        matches!(self, DeviceKind::Camera)
    }
}

impl std::str::FromStr for DeviceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature_sensor" => Ok(DeviceKind::TemperatureSensor),
            "light_sensor" => Ok(DeviceKind::LightSensor),
            "soil_sensor" => Ok(DeviceKind::SoilSensor),
            "camera" => Ok(DeviceKind::Camera),
            "light" => Ok(DeviceKind::Light),
            "water" => Ok(DeviceKind::Water),
            "fan" => Ok(DeviceKind::Fan),
            other => Err(ConfigError::UnknownDeviceType(other.to_string())),
        }
    }
}

/// One entry in the device tree
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Device type name; unknown names fail at registry build
    #[serde(rename = "type")]
    pub kind: String,
    /// Sensor poll cadence in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Downstream instruments re-evaluated from this sensor's readings
    #[serde(default)]
    pub connections: Vec<String>,
    /// Fixed readings served by the simulated capability
    #[serde(default)]
    pub simulate: HashMap<String, f64>,
    /// Threshold lane (instruments evaluated from connected sensors)
    pub threshold: Option<ThresholdConfig>,
    /// Free-running lane (periodic cycling independent of any sensor)
    pub free_run: Option<FreeRunConfig>,
}

fn default_interval_secs() -> u64 {
    10
}

impl DeviceConfig {
    pub fn kind(&self) -> Result<DeviceKind, ConfigError> {
        self.kind.parse()
    }
}

/// Threshold lane configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    /// Key into the upstream sensor's reading map, e.g. "temperature"
    pub limiter_key: String,
    /// less | greater | equal | not_equal
    pub comparison: String,
    pub threshold: f64,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// The state whose dwell time consumes the budget
    #[serde(default = "default_accumulation_state")]
    pub accumulation_state: bool,
    pub budget: BudgetConfig,
}

fn default_accumulation_state() -> bool {
    true
}

impl ThresholdConfig {
    /// Build the lane scheduler, validating comparison and window bounds
    pub fn build(&self, device: &str, clock: &impl Clock) -> Result<ThresholdScheduler, ConfigError> {
        let comparison: ComparisonKind = self.comparison.parse()?;
        let budget = self.budget.build(device, self.accumulation_state, clock)?;
        Ok(ThresholdScheduler::new(
            IntervalGate::new(Duration::from_secs(self.interval_secs)),
            budget,
            comparison,
            self.threshold,
        ))
    }
}

/// Free-running lane configuration
///
/// The lane is evaluated with a sensor value of 0.0, so the default
/// comparison (`not_equal` against 1.0) passes whenever the gate, window,
/// and budget allow, giving plain periodic cycling. Overriding the
/// comparison turns the lane into a gated constant decision instead.
#[derive(Debug, Clone, Deserialize)]
pub struct FreeRunConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// How long each activation runs before the scheduled stop fires
    #[serde(default = "default_run_secs")]
    pub run_secs: u64,
    #[serde(default = "default_free_comparison")]
    pub comparison: String,
    #[serde(default = "default_free_threshold")]
    pub threshold: f64,
    #[serde(default = "default_accumulation_state")]
    pub accumulation_state: bool,
    pub budget: Option<BudgetConfig>,
}

fn default_run_secs() -> u64 {
    10
}

fn default_free_comparison() -> String {
    "not_equal".to_string()
}

fn default_free_threshold() -> f64 {
    1.0
}

impl FreeRunConfig {
    pub fn run_duration(&self) -> Duration {
        Duration::from_secs(self.run_secs)
    }

    /// Build the lane scheduler; a missing budget means an unbounded one
    pub fn build(&self, device: &str, clock: &impl Clock) -> Result<ThresholdScheduler, ConfigError> {
        let comparison: ComparisonKind = self.comparison.parse()?;
        let budget = match &self.budget {
            Some(budget) => budget.build(device, self.accumulation_state, clock)?,
            None => Budget::new(Duration::MAX, None, self.accumulation_state, clock),
        };
        Ok(ThresholdScheduler::new(
            IntervalGate::new(Duration::from_secs(self.interval_secs)),
            budget,
            comparison,
            self.threshold,
        ))
    }
}

/// Daily budget configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetConfig {
    /// Daily ceiling in seconds
    pub seconds: u64,
    /// Window start, "H:MM:SS AM/PM"
    pub time_start: Option<String>,
    /// Window end, "H:MM:SS AM/PM"
    pub time_end: Option<String>,
}

impl BudgetConfig {
    pub fn build(
        &self,
        device: &str,
        accumulation_target: bool,
        clock: &impl Clock,
    ) -> Result<Budget, ConfigError> {
        let start = self
            .time_start
            .as_deref()
            .map(|s| parse_time_of_day(device, s))
            .transpose()?;
        let end = self
            .time_end
            .as_deref()
            .map(|s| parse_time_of_day(device, s))
            .transpose()?;
        let window = ActiveWindow::from_bounds(device, start, end)?;
        Ok(Budget::new(
            Duration::from_secs(self.seconds),
            window,
            accumulation_target,
            clock,
        ))
    }
}

/// Parse a 12-hour clock time like "8:30:00 PM"
pub fn parse_time_of_day(device: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%I:%M:%S %p").map_err(|source| {
        ConfigError::InvalidTimeOfDay {
            device: device.to_string(),
            value: value.to_string(),
            source,
        }
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
