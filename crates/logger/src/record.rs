//! Log record type

use crate::{Fields, Level};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A single log record, before formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Log level
    pub level: Level,
    /// The log message
    pub message: String,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
    /// Structured fields, in insertion order
    pub fields: Fields,
    /// Stack or error-chain text, when the record describes a failure
    pub stack: Option<String>,
}

impl Record {
    /// Create a new record stamped with the current time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            fields: Fields::new(),
            stack: None,
        }
    }

    /// Builder-style method for adding a single field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Builder-style method for replacing all fields
    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Builder-style method for setting the stack text
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Builder-style method for pinning the timestamp
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
