// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability contracts for external device collaborators
//!
//! Hardware drivers, persistence, and retention live outside this crate;
//! the orchestrator only sees these traits. `fake` provides recording
//! implementations for tests, `sim` the software devices the daemon wires
//! up when no hardware is attached.

pub mod fake;
pub mod sim;
mod traits;

pub use fake::{FakeInstrument, FakeSensor};
pub use sim::{SimulatedInstrument, SimulatedSensor};
pub use traits::{
    CapabilityError, InstrumentCapability, Reading, SensorCapability, TriggerError,
};
