//! Bridge from `tracing` to a [`LogService`]
//!
//! Lets code instrumented with `tracing` macros reach Logstash through the
//! same service. Event fields become record fields and the names of enclosing
//! spans are joined into a `span` field.

use crate::LogService;
use logservice_logger::Level;
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

/// Events from these targets are dropped so the Logstash sink's own
/// diagnostics cannot feed back into it.
const IGNORED_TARGET_PREFIXES: &[&str] = &["logservice_logger_logstash"];

/// A tracing layer that forwards events to a [`LogService`]
#[derive(Debug, Clone)]
pub struct LogServiceLayer {
    service: LogService,
}

impl LogServiceLayer {
    /// Create a layer forwarding to `service`
    #[must_use]
    pub const fn new(service: LogService) -> Self {
        Self { service }
    }
}

impl<S> Layer<S> for LogServiceLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if IGNORED_TARGET_PREFIXES
            .iter()
            .any(|prefix| metadata.target().starts_with(prefix))
        {
            return;
        }

        let level = map_level(*metadata.level());
        let logger = self.service.logger();
        if logger.is_silent() || level < logger.level() {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<_> = scope.from_root().map(|span| span.name()).collect();
            visitor
                .fields
                .insert("span".to_string(), Value::String(spans.join("::")));
        }

        let meta = if visitor.fields.is_empty() {
            None
        } else {
            Some(Value::Object(visitor.fields))
        };
        self.service
            .emit(logger, level, visitor.message, meta, None);
    }
}

const fn map_level(level: tracing::Level) -> Level {
    match level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
    }
}

/// Collects the message and the remaining fields of an event
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Map<String, Value>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{value:?}");
        if field.name() == "message" {
            self.message = text;
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(text));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), value.into());
    }
}

/// Install a global subscriber that forwards every `tracing` event to
/// `service`.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_tracing_bridge(service: LogService) -> Result<(), TryInitError> {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(LogServiceLayer::new(service))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use logservice_logger::MultiLogger;
    use logservice_logger::test_support::CaptureTransport;
    use serde_json::json;
    use std::sync::Arc;
    use tracing_subscriber::prelude::*;

    fn service_with_capture() -> (LogService, CaptureTransport) {
        let capture = CaptureTransport::new();
        let logger = MultiLogger::builder()
            .transport(Arc::new(capture.clone()))
            .build();
        (LogService::from_logger("bridge", None, logger), capture)
    }

    #[test]
    fn test_events_become_records() {
        let (service, capture) = service_with_capture();
        let subscriber = tracing_subscriber::registry().with(LogServiceLayer::new(service));

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("checkout");
            let _guard = span.enter();
            tracing::warn!(order_id = 17, paid = false, "payment pending");
            tracing::debug!("below the default level");
        });

        let values = capture.values();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["level"], json!("WARN"));
        assert_eq!(values[0]["message"], json!("payment pending"));
        assert_eq!(values[0]["serviceName"], json!("bridge"));
        assert_eq!(values[0]["order_id"], json!(17));
        assert_eq!(values[0]["paid"], json!(false));
        assert_eq!(values[0]["span"], json!("checkout"));
    }

    #[test]
    fn test_sink_diagnostics_are_ignored() {
        let (service, capture) = service_with_capture();
        let subscriber = tracing_subscriber::registry().with(LogServiceLayer::new(service));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "logservice_logger_logstash::transport", "connection lost");
            tracing::error!(target: "app", "kept");
        });

        let values = capture.values();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["message"], json!("kept"));
    }
}
