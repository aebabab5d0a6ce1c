//! Test support utilities
//!
//! This module provides a transport that captures records in memory.
//! It's only available when the `test-support` feature is enabled.

use crate::{Record, Transport};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// A transport that captures every line and record for assertions
#[derive(Clone, Default)]
pub struct CaptureTransport {
    entries: Arc<Mutex<Vec<(String, Record)>>>,
}

impl CaptureTransport {
    /// Create a new capture transport
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatted lines, in emission order
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(line, _)| line.clone()).collect()
    }

    /// Records, in emission order
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.entries
            .lock()
            .iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Lines parsed back into JSON; unparsable lines become `Value::Null`
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap_or(Value::Null))
            .collect()
    }

    /// Number of captured records
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Check if any line contains a specific string
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries.lock().iter().any(|(line, _)| line.contains(text))
    }

    /// Clear captured entries
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Transport for CaptureTransport {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn write(&self, line: &str, record: &Record) {
        self.entries.lock().push((line.to_string(), record.clone()));
    }
}
