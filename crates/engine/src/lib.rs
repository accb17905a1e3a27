// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! grove-engine: the orchestration layer of the grove controller
//!
//! Builds the device registry from configuration and capability handles,
//! then drives the tick loop: sample sensors, drain the interaction queue
//! through threshold lanes, run free-running lanes, and stop timed runs.

pub mod orchestrator;
pub mod record;
pub mod registry;
pub mod timers;

pub use orchestrator::{Orchestrator, TickReport};
pub use record::{ImageRecord, LogRecord, Record, RecordLevel, RecordSink, TracingSink};
pub use registry::{DeviceHandle, DeviceRegistry, InstrumentEntry, SensorEntry};
pub use timers::StopTimers;
