// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interaction queue between sampling and decision phases
//!
//! Sensor readings produced in phase 1 of a tick travel through this FIFO
//! to the instrument evaluations in phase 2 of the same tick. Items are
//! transient: created when a sensor's gate fires, consumed exactly once
//! while draining.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// One sensor reading queued for connected instruments
#[derive(Debug, Clone)]
pub struct QueueItem {
    /// Name of the sensor that produced the reading
    pub sensor_name: String,
    /// Instruments to re-evaluate against this reading
    pub connections: Vec<String>,
    /// Metric name to value, e.g. "temperature" or "lux"
    pub reading: HashMap<String, f64>,
    /// When the sensor was read
    pub timestamp: Instant,
}

/// FIFO channel carrying readings from sampling to decision
#[derive(Debug, Default)]
pub struct InteractionQueue {
    items: VecDeque<QueueItem>,
}

impl InteractionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; insertion order is consumption order
    pub fn push(&mut self, item: QueueItem) {
        self.items.push_back(item);
    }

    /// Pop the head item, if any
    pub fn pop(&mut self) -> Option<QueueItem> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view of pending items, oldest first (status reporting)
    pub fn iter(&self) -> impl Iterator<Item = &QueueItem> {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
