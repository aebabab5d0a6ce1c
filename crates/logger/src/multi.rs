//! Multi-transport logger

use crate::{Context, JsonFormatter, Level, Logger, Record, Transport};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// State shared between a logger and every child derived from it
struct Shared {
    level: AtomicU8,
    silent: AtomicBool,
    formatter: RwLock<JsonFormatter>,
    transports: Vec<Arc<dyn Transport>>,
}

/// Logger that filters, formats and fans records out to its transports.
///
/// Cloning is cheap; clones and children created through
/// [`Logger::with_context`] observe level, silence and formatter changes made
/// through any of them.
#[derive(Clone)]
pub struct MultiLogger {
    shared: Arc<Shared>,
    context: Context,
}

impl MultiLogger {
    /// Start building a logger
    #[must_use]
    pub fn builder() -> MultiLoggerBuilder {
        MultiLoggerBuilder::default()
    }

    /// Current minimum level
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.shared.level.load(Ordering::Acquire))
    }

    /// Change the minimum level; applies to the next record
    pub fn set_level(&self, level: Level) {
        self.shared.level.store(level as u8, Ordering::Release);
    }

    /// Whether emission is suppressed
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.shared.silent.load(Ordering::Acquire)
    }

    /// Suppress or restore emission to every transport
    pub fn set_silent(&self, silent: bool) {
        self.shared.silent.store(silent, Ordering::Release);
    }

    /// The active formatter
    #[must_use]
    pub fn formatter(&self) -> JsonFormatter {
        *self.shared.formatter.read()
    }

    /// Replace the active formatter
    pub fn set_formatter(&self, formatter: JsonFormatter) {
        *self.shared.formatter.write() = formatter;
    }

    /// Context fields this logger stamps onto records
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Names of the configured transports
    #[must_use]
    pub fn transport_names(&self) -> Vec<&'static str> {
        self.shared.transports.iter().map(|t| t.name()).collect()
    }

    /// Child logger sharing this logger's state, returned concretely
    #[must_use]
    pub fn child(&self, context: Context) -> Self {
        Self {
            shared: self.shared.clone(),
            context: self.context.merge(&context),
        }
    }
}

impl fmt::Debug for MultiLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLogger")
            .field("level", &self.level())
            .field("silent", &self.is_silent())
            .field("formatter", &self.formatter())
            .field("transports", &self.transport_names())
            .field("context", &self.context)
            .finish()
    }
}

impl Logger for MultiLogger {
    fn log(&self, mut record: Record) {
        if self.is_silent() || !self.is_enabled(record.level) {
            return;
        }

        // Context fields fill in, record fields win
        for (key, value) in self.context.fields() {
            if !record.fields.contains_key(key) {
                record.fields.insert(key.clone(), value.clone());
            }
        }

        let line = self.formatter().format(&record);
        for transport in &self.shared.transports {
            transport.write(&line, &record);
        }
    }

    fn flush(&self) {
        for transport in &self.shared.transports {
            transport.flush();
        }
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    fn with_context(&self, context: Context) -> Arc<dyn Logger> {
        Arc::new(self.child(context))
    }
}

/// Builder for [`MultiLogger`]
#[derive(Default)]
pub struct MultiLoggerBuilder {
    level: Level,
    silent: bool,
    formatter: JsonFormatter,
    transports: Vec<Arc<dyn Transport>>,
    context: Context,
}

impl MultiLoggerBuilder {
    /// Set the minimum level
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Start silenced
    #[must_use]
    pub const fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Set the formatter
    #[must_use]
    pub const fn formatter(mut self, formatter: JsonFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Add a transport
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Set root context fields
    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Build the logger
    #[must_use]
    pub fn build(self) -> MultiLogger {
        MultiLogger {
            shared: Arc::new(Shared {
                level: AtomicU8::new(self.level as u8),
                silent: AtomicBool::new(self.silent),
                formatter: RwLock::new(self.formatter),
                transports: self.transports,
            }),
            context: self.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggerExt;
    use crate::test_support::CaptureTransport;
    use serde_json::json;

    fn logger_with_capture(level: Level) -> (MultiLogger, CaptureTransport) {
        let capture = CaptureTransport::new();
        let logger = MultiLogger::builder()
            .level(level)
            .transport(Arc::new(capture.clone()))
            .build();
        (logger, capture)
    }

    #[test]
    fn test_level_filtering() {
        let (logger, capture) = logger_with_capture(Level::Warn);

        logger.debug("filtered");
        logger.info("filtered too");
        logger.warn("kept");
        logger.error("kept too");

        let records = capture.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, Level::Warn);
        assert_eq!(records[1].level, Level::Error);
    }

    #[test]
    fn test_set_level_applies_to_next_record() {
        let (logger, capture) = logger_with_capture(Level::Info);

        logger.debug("dropped");
        logger.set_level(Level::Debug);
        logger.debug("delivered");

        assert_eq!(capture.len(), 1);
        assert_eq!(logger.level(), Level::Debug);
    }

    #[test]
    fn test_silent_suppresses_every_transport() {
        let first = CaptureTransport::new();
        let second = CaptureTransport::new();
        let logger = MultiLogger::builder()
            .transport(Arc::new(first.clone()))
            .transport(Arc::new(second.clone()))
            .build();

        logger.set_silent(true);
        logger.error("nobody hears this");
        assert!(first.is_empty());
        assert!(second.is_empty());

        logger.set_silent(false);
        logger.error("heard");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_formatter_swap() {
        let (logger, capture) = logger_with_capture(Level::Info);

        logger.info("compact");
        logger.set_formatter(JsonFormatter::pretty());
        logger.info("pretty");

        let lines = capture.lines();
        assert!(!lines[0].contains('\n'));
        assert!(lines[1].contains("\n  \"message\": \"pretty\""));
    }

    #[test]
    fn test_child_shares_state_and_adds_context() {
        let (logger, capture) = logger_with_capture(Level::Info);
        let child = logger.with_context(Context::new().with_field("context", "ctx-A"));

        child.warn("m");
        logger.set_silent(true);
        child.warn("suppressed through parent");

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields.get("context"), Some(&json!("ctx-A")));
    }

    #[test]
    fn test_record_fields_win_over_context() {
        let (logger, capture) = logger_with_capture(Level::Info);
        let child = logger.child(Context::new().with_field("context", "outer"));

        child.log(Record::new(Level::Info, "m").with_field("context", "inner"));

        assert_eq!(
            capture.records()[0].fields.get("context"),
            Some(&json!("inner"))
        );
    }

    #[test]
    fn test_debug_lists_transports() {
        let (logger, _capture) = logger_with_capture(Level::Info);
        let rendered = format!("{logger:?}");
        assert!(rendered.contains("capture"));
    }
}
