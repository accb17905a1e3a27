// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! grove-core: scheduling primitives for the grove controller
//!
//! This crate provides:
//! - Clock-injected, deterministic scheduling state machines (interval
//!   gates, budgets, active windows, threshold schedulers)
//! - The interaction queue connecting sampling to decisions
//! - Device-tree configuration types
//! - Capability traits for sensors and instruments, with fake and
//!   simulated implementations

pub mod budget;
pub mod capability;
pub mod clock;
pub mod comparison;
pub mod config;
pub mod error;
pub mod gate;
pub mod queue;
pub mod scheduler;
pub mod window;

// Re-exports
pub use budget::Budget;
pub use capability::{
    CapabilityError, InstrumentCapability, Reading, SensorCapability, TriggerError,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use comparison::ComparisonKind;
pub use config::{Config, DeviceConfig, DeviceKind};
pub use error::ConfigError;
pub use gate::IntervalGate;
pub use queue::{InteractionQueue, QueueItem};
pub use scheduler::{Lane, ThresholdScheduler};
pub use window::ActiveWindow;
