// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn serves_the_configured_reading() {
    let sensor = SimulatedSensor::new(
        "sht31",
        Reading::from([("temperature".to_string(), 24.5)]),
    );
    assert!(sensor.readable());
    let reading = sensor.read().await.unwrap();
    assert_eq!(reading["temperature"], 24.5);
}

#[tokio::test]
async fn empty_simulate_table_means_unreadable() {
    let sensor = SimulatedSensor::new("sht31", Reading::new());
    assert!(!sensor.readable());
    assert!(matches!(
        sensor.read().await,
        Err(CapabilityError::Unreadable)
    ));
}

#[tokio::test]
async fn explicit_trigger_sets_the_requested_state() {
    let relay = SimulatedInstrument::new("exhaust_fan");
    assert!(!relay.state());

    assert!(relay.trigger(Some(true)).await.unwrap());
    assert!(relay.state());

    // Re-asserting the same state is a no-op, not a toggle
    assert!(relay.trigger(Some(true)).await.unwrap());
    assert!(relay.state());
}

#[tokio::test]
async fn trigger_without_a_level_toggles() {
    let relay = SimulatedInstrument::new("pump");
    assert!(relay.trigger(None).await.unwrap());
    assert!(relay.state());
    assert!(!relay.trigger(None).await.unwrap());
    assert!(!relay.state());
}
