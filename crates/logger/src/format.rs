//! JSON rendering of records

use crate::{Fields, Record};
use chrono::SecondsFormat;
use serde_json::Value;

/// Keys owned by the formatter; record fields with these names are skipped.
pub const RESERVED_FIELDS: &[&str] = &["timestamp", "level", "message", "stack"];

/// Renders a [`Record`] as a single JSON document.
///
/// Key order is `timestamp`, `level`, `message`, then the record's fields in
/// insertion order, then `stack` when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Formatter producing compact JSON
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    /// Formatter producing JSON indented with two spaces
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Build from the pretty-print flag
    #[must_use]
    pub const fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Whether output is indented
    #[must_use]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Build the ordered JSON object for a record
    #[must_use]
    pub fn to_value(&self, record: &Record) -> Value {
        let mut object = Fields::new();
        object.insert(
            "timestamp".to_string(),
            Value::String(
                record
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );
        object.insert(
            "level".to_string(),
            Value::String(record.level.as_upper_str().to_string()),
        );
        object.insert(
            "message".to_string(),
            Value::String(record.message.clone()),
        );

        for (key, value) in &record.fields {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            object.insert(key.clone(), value.clone());
        }

        if let Some(stack) = &record.stack {
            object.insert("stack".to_string(), Value::String(stack.clone()));
        }

        Value::Object(object)
    }

    /// Render a record to its textual form
    #[must_use]
    pub fn format(&self, record: &Record) -> String {
        let value = self.to_value(record);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        // Serializing a `Value` only fails on non-string map keys, which it cannot hold.
        rendered.unwrap_or_default()
    }
}
