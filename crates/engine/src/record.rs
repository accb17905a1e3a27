// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Emitted records for readings and state changes
//!
//! The orchestrator reports every sensor reading and every instrument state
//! change through a [`RecordSink`]. Persistence is an external collaborator;
//! the default sink only forwards to tracing. Camera-type sensors produce an
//! image record instead of a generic log record.

use serde_json::Value;
use std::sync::Mutex;

/// Severity attached to a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// A structured log line for a reading or a state change
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Device the record is about
    pub name: String,
    pub level: RecordLevel,
    pub message: String,
    /// Free-form JSON payload (reading values, commanded state, ...)
    pub metadata: Value,
}

/// A captured frame notice from a camera-type sensor
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub name: String,
    /// Reading metadata accompanying the capture
    pub metadata: Value,
}

/// One emitted record
#[derive(Debug, Clone)]
pub enum Record {
    Log(LogRecord),
    Image(ImageRecord),
}

impl Record {
    pub fn device(&self) -> &str {
        match self {
            Record::Log(log) => &log.name,
            Record::Image(image) => &image.name,
        }
    }
}

/// Destination for emitted records
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: Record);
}

/// Default sink: forward everything to tracing
#[derive(Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn emit(&self, record: Record) {
        match record {
            Record::Log(log) => match log.level {
                RecordLevel::Debug => {
                    tracing::debug!(device = %log.name, metadata = %log.metadata, "{}", log.message)
                }
                RecordLevel::Info => {
                    tracing::info!(device = %log.name, metadata = %log.metadata, "{}", log.message)
                }
                RecordLevel::Warning => {
                    tracing::warn!(device = %log.name, metadata = %log.metadata, "{}", log.message)
                }
                RecordLevel::Error => {
                    tracing::error!(device = %log.name, metadata = %log.metadata, "{}", log.message)
                }
            },
            Record::Image(image) => {
                tracing::info!(device = %image.name, metadata = %image.metadata, "image captured")
            }
        }
    }
}

/// In-memory sink for tests
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: Record) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record);
    }
}
