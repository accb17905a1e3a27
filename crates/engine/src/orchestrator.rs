// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tick loop
//!
//! One tick runs phases in strict sequence: due stop timers, sensor
//! sampling into the interaction queue, queue drain with instrument
//! decisions, then free-running lanes. The queue is fully populated before
//! draining begins, so no instrument ever observes a partial batch of
//! readings. The loop is a single task; per-tick failures are contained
//! and never terminate it.

use crate::record::{LogRecord, Record, RecordLevel, RecordSink, TracingSink};
use crate::registry::DeviceRegistry;
use crate::timers::StopTimers;
use grove_core::capability::InstrumentCapability;
use grove_core::clock::Clock;
use grove_core::queue::{InteractionQueue, QueueItem};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Tick indices wrap back to zero past this ceiling
const TICK_INDEX_CEILING: u64 = 1_000_000;

/// Counters describing one completed tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick_index: u64,
    /// Queue items created in the sampling phase
    pub sampled: usize,
    /// Queue depth when draining began (equals `sampled`: the two-phase
    /// barrier means nothing is consumed while sampling runs)
    pub queue_depth_at_drain: usize,
    /// Threshold and free-running evaluations that reached a decision
    pub evaluations: usize,
    /// Triggers actually sent to instruments
    pub triggers: usize,
    /// Gate-closed, unreadable, malformed-value, and overlap skips
    pub skips: usize,
    /// Stop timers that fired
    pub stops: usize,
}

/// Drives sampling, decisions, and free-running lanes over the registry
pub struct Orchestrator<C: Clock> {
    registry: DeviceRegistry,
    queue: InteractionQueue,
    timers: StopTimers,
    clock: C,
    sink: Arc<dyn RecordSink>,
    tick_interval: Duration,
    tick_index: u64,
}

impl<C: Clock> Orchestrator<C> {
    pub fn new(registry: DeviceRegistry, clock: C, tick_interval: Duration) -> Self {
        Self {
            registry,
            queue: InteractionQueue::new(),
            timers: StopTimers::new(),
            clock,
            sink: Arc::new(TracingSink),
            tick_interval,
            tick_index: 0,
        }
    }

    /// Replace the default tracing sink
    pub fn with_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Run ticks forever, sleeping the configured quantum between them
    pub async fn run(&mut self) {
        loop {
            let report = self.tick().await;
            debug!(
                tick = report.tick_index,
                sampled = report.sampled,
                evaluations = report.evaluations,
                triggers = report.triggers,
                "tick complete"
            );
            tokio::time::sleep(self.tick_interval).await;
        }
    }

    /// Run one tick to completion
    pub async fn tick(&mut self) -> TickReport {
        let mut report = TickReport {
            tick_index: self.tick_index,
            ..TickReport::default()
        };

        self.fire_due_stops(&mut report).await;
        self.sample_sensors(&mut report).await;
        report.queue_depth_at_drain = self.queue.len();
        self.drain_queue(&mut report).await;
        self.run_free_lanes(&mut report).await;

        self.tick_index = (self.tick_index + 1) % TICK_INDEX_CEILING;
        report
    }

    /// Phase 0: stop timed runs whose duration has elapsed
    async fn fire_due_stops(&mut self, report: &mut TickReport) {
        for stop in self.timers.poll(self.clock.now()) {
            report.stops += 1;
            // The threshold lane may have switched the instrument off
            // mid-run; a stop for an already-off instrument is a no-op.
            let still_on = self
                .registry
                .instrument_mut(&stop.instrument)
                .map(|entry| entry.state)
                .unwrap_or(false);
            if still_on {
                self.apply_trigger(&stop.instrument, false, report).await;
            }
        }
    }

    /// Phase 1: poll every sensor whose gate fires and queue the readings
    async fn sample_sensors(&mut self, report: &mut TickReport) {
        for idx in 0..self.registry.sensor_count() {
            let Some(sensor) = self.registry.sensor_mut(idx) else {
                continue;
            };
            if !sensor.lane.can_evaluate(&self.clock) {
                continue;
            }
            let name = sensor.name.clone();
            let is_camera = sensor.kind.is_camera();
            let connections = sensor.connections.clone();
            let capability = Arc::clone(&sensor.capability);

            if !capability.readable() {
                warn!(sensor = %name, "sensor not readable, skipping this tick");
                report.skips += 1;
                continue;
            }
            let reading = match capability.read().await {
                Ok(reading) => reading,
                Err(err) => {
                    warn!(sensor = %name, error = %err, "sensor read failed, skipping this tick");
                    report.skips += 1;
                    continue;
                }
            };

            let metadata = json!(reading);
            self.queue.push(QueueItem {
                sensor_name: name.clone(),
                connections,
                reading,
                timestamp: self.clock.now(),
            });
            report.sampled += 1;

            let record = if is_camera {
                Record::Image(crate::record::ImageRecord { name, metadata })
            } else {
                Record::Log(LogRecord {
                    name,
                    level: RecordLevel::Info,
                    message: "sensor reading".to_string(),
                    metadata,
                })
            };
            self.sink.emit(record);
        }
    }

    /// Phase 2: drain the queue and evaluate every connected threshold lane
    async fn drain_queue(&mut self, report: &mut TickReport) {
        while let Some(item) = self.queue.pop() {
            for target in item.connections.clone() {
                self.evaluate_threshold(&target, &item, report).await;
            }
        }
    }

    async fn evaluate_threshold(&mut self, target: &str, item: &QueueItem, report: &mut TickReport) {
        let decision = {
            let Some(entry) = self.registry.instrument_mut(target) else {
                // Connections are validated at build; an unknown name here
                // means the registry was bypassed.
                warn!(instrument = %target, "connection target missing from registry");
                report.skips += 1;
                return;
            };
            let limiter_key = entry.limiter_key.clone();
            let state = entry.state;
            let name = entry.name.clone();
            let Some(scheduler) = entry.threshold_scheduler_mut() else {
                report.skips += 1;
                return;
            };
            if !scheduler.can_evaluate(&self.clock) {
                debug!(instrument = %name, "gate closed, not re-examined this tick");
                report.skips += 1;
                return;
            }

            // Malformed readings are filtered before decide
            let value = limiter_key
                .as_deref()
                .and_then(|key| item.reading.get(key))
                .copied()
                .filter(|v| v.is_finite());
            let Some(value) = value else {
                warn!(
                    instrument = %name,
                    sensor = %item.sensor_name,
                    limiter_key = limiter_key.as_deref().unwrap_or(""),
                    "limiter key missing or not finite in reading"
                );
                report.skips += 1;
                return;
            };

            let next = scheduler.decide(value, &self.clock);
            scheduler.record_outcome(next, item.timestamp, &self.clock);
            report.evaluations += 1;

            if state == next {
                None
            } else {
                Some(next)
            }
        };

        if let Some(next) = decision {
            self.apply_trigger(target, next, report).await;
        }
    }

    /// Phase 3: evaluate free-running lanes; no sensor value is meaningful
    async fn run_free_lanes(&mut self, report: &mut TickReport) {
        for idx in 0..self.registry.instrument_count() {
            let decision = {
                let Some(entry) = self.registry.instrument_at_mut(idx) else {
                    continue;
                };
                let name = entry.name.clone();
                let state = entry.state;
                let Some(free_run) = entry.free_run.as_mut() else {
                    continue;
                };
                let run = free_run.run;
                if !free_run.lane.can_evaluate(&self.clock) {
                    continue;
                }
                let Some(scheduler) = free_run.lane.as_threshold_mut() else {
                    continue;
                };
                let next = scheduler.decide(0.0, &self.clock);
                scheduler.record_outcome(next, self.clock.now(), &self.clock);
                report.evaluations += 1;
                Some((name, state, next, run))
            };
            let Some((name, state, next, run)) = decision else {
                continue;
            };

            if next {
                if self.timers.is_pending(&name) {
                    // Open question upstream: overlapping activations are
                    // dropped, not queued or coalesced.
                    warn!(instrument = %name, "timed run still active, dropping activation");
                    report.skips += 1;
                    continue;
                }
                if state != next && !self.apply_trigger(&name, true, report).await {
                    continue;
                }
                self.timers.schedule(&name, run, &self.clock);
            } else if state {
                self.timers.cancel(&name);
                self.apply_trigger(&name, false, report).await;
            }
        }
    }

    /// Command a state and reconcile the observed state on success
    ///
    /// A failed trigger leaves the observed state unchanged; the lane's
    /// gate is the retry mechanism.
    async fn apply_trigger(&mut self, name: &str, next: bool, report: &mut TickReport) -> bool {
        let capability: Option<Arc<dyn InstrumentCapability>> = self
            .registry
            .instrument_mut(name)
            .map(|entry| Arc::clone(&entry.capability));
        let Some(capability) = capability else {
            return false;
        };

        match capability.trigger(Some(next)).await {
            Ok(applied) => {
                if let Some(entry) = self.registry.instrument_mut(name) {
                    entry.state = applied;
                }
                report.triggers += 1;
                self.sink.emit(Record::Log(LogRecord {
                    name: name.to_string(),
                    level: RecordLevel::Info,
                    message: "instrument state changed".to_string(),
                    metadata: json!({ "state": applied }),
                }));
                true
            }
            Err(err) => {
                warn!(instrument = %name, error = %err, "trigger failed, state unchanged");
                false
            }
        }
    }

    /// Device table plus pending queue items, logged at startup
    pub fn status_report(&self) -> String {
        let mut out = String::from("\n");
        for sensor in self.registry.sensors() {
            let status = if sensor.capability.readable() {
                "(online)"
            } else {
                "(offline)"
            };
            out.push_str(&format!("\t{:<20} - {:<10}\n", sensor.name, status));
        }
        for instrument in self.registry.instruments() {
            let status = if instrument.capability.readable() {
                "(online)"
            } else {
                "(offline)"
            };
            out.push_str(&format!("\t{:<20} - {:<10}\n", instrument.name, status));
        }

        if !self.queue.is_empty() {
            out.push_str("\nPending queue items:\n");
            for item in self.queue.iter() {
                out.push_str(&format!(
                    "\t({}) to {}\n",
                    item.sensor_name,
                    item.connections.join(", ")
                ));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
