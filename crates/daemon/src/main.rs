// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grove Daemon (groved)
//!
//! Background process that owns the device registry and runs the tick loop.
//! With no hardware attached every device is wired to its simulated
//! capability from the config's `simulate` tables.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use grove_core::capability::{SimulatedInstrument, SimulatedSensor};
use grove_core::clock::SystemClock;
use grove_core::config::Config;
use grove_core::error::ConfigError;
use grove_engine::registry::{DeviceHandle, DeviceRegistry};
use grove_engine::Orchestrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("grove.toml")
    };

    // Load configuration
    let config = Config::from_path(&config_path)?;

    // Set up logging
    let _log_guard = setup_logging(&config)?;

    info!("Starting groved with config: {}", config_path.display());

    let clock = SystemClock;
    let handles = simulated_handles(&config)?;
    let registry = DeviceRegistry::build(&config, handles, &clock)?;

    let mut orchestrator = Orchestrator::new(registry, clock, config.tick_interval);
    info!("{}", orchestrator.status_report());

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!("Daemon ready, ticking every {:?}", config.tick_interval);

    tokio::select! {
        _ = orchestrator.run() => {}

        // Graceful shutdown on SIGTERM
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
        }

        // Graceful shutdown on SIGINT
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down...");
        }
    }

    info!("Daemon stopped");
    Ok(())
}

/// Wire every configured device to its simulated capability
///
/// Sensors serve the fixed readings from their `simulate` table; a sensor
/// with an empty table reports itself unreadable and is skipped each tick.
fn simulated_handles(config: &Config) -> Result<HashMap<String, DeviceHandle>, ConfigError> {
    let mut handles = HashMap::new();
    for (name, device) in &config.devices {
        let kind = device.kind()?;
        let handle = if kind.is_sensor() {
            let reading = device.simulate.clone();
            DeviceHandle::Sensor(Arc::new(SimulatedSensor::new(name.clone(), reading)))
        } else {
            DeviceHandle::Instrument(Arc::new(SimulatedInstrument::new(name.clone())))
        };
        handles.insert(name.clone(), handle);
    }
    Ok(handles)
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, std::io::Error> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let directory = match config.log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = config
        .log_path
        .file_name()
        .ok_or_else(|| std::io::Error::other("log_path has no file name"))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}
