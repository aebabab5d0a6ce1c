//! The log service facade

use crate::config::{HookLevel, LogServiceConfig, NotifyHook};
use crate::context::ContextLogger;
use crate::error::Result;
use crate::{CONTEXT_KEY, META_KEY, SERVICE_NAME_KEY, inspect};
use logservice_logger::{
    ConsoleTransport, Context, Fields, JsonFormatter, Level, Logger, MultiLogger, RESERVED_FIELDS,
    Record,
};
use logservice_logger_logstash::LogstashTransport;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Logging facade for one service.
///
/// Cloning is cheap and every clone drives the same underlying logger. No
/// logging method returns an error or panics; failures are dropped so that
/// logging can never take down the caller.
#[derive(Clone)]
pub struct LogService {
    inner: Arc<Inner>,
}

struct Inner {
    service_name: String,
    logger: MultiLogger,
    callback: Option<NotifyHook>,
}

impl LogService {
    /// Build the service, falling back to local-only output if the Logstash
    /// sink cannot be set up.
    ///
    /// The fallback keeps the console transport (when enabled) and all runtime
    /// controls; the failure is reported once on stderr.
    #[must_use]
    pub fn new(config: LogServiceConfig) -> Self {
        let logger = match build_logger(&config) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("Cannot establish connection to logstash: {e}");
                logger_builder(&config).build()
            }
        };

        Self::from_logger(config.service_name, config.callback, logger)
    }

    /// Build the service, surfacing a Logstash sink failure instead of
    /// falling back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sink`](crate::Error::Sink) when the transport cannot be
    /// created, e.g. outside a Tokio runtime or with an invalid TLS host name.
    pub fn try_new(config: LogServiceConfig) -> Result<Self> {
        let logger = build_logger(&config)?;
        Ok(Self::from_logger(
            config.service_name,
            config.callback,
            logger,
        ))
    }

    /// Assemble a service around an already built logger
    pub fn from_logger(
        service_name: impl Into<String>,
        callback: Option<NotifyHook>,
        logger: MultiLogger,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                service_name: service_name.into(),
                logger,
                callback,
            }),
        }
    }

    /// The service name stamped on every record
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.inner.service_name
    }

    /// The underlying logger
    #[must_use]
    pub fn logger(&self) -> &MultiLogger {
        &self.inner.logger
    }

    /// Emit a record at `level`.
    ///
    /// The notify hook, if any, runs first. `meta` objects are merged field by
    /// field; any other non-null value is attached under `meta`.
    /// `serviceName` always reflects this service, whatever `meta` holds.
    /// Keys named `timestamp`, `level`, `message` or `stack` would clash with
    /// the record's own and are nested under `meta` instead.
    pub fn log(&self, level: Level, message: impl Into<String>, meta: Option<Value>) {
        let message = message.into();
        if let Some(callback) = &self.inner.callback {
            callback(HookLevel::from(level), &message);
        }
        self.emit(&self.inner.logger, level, message, meta, None);
    }

    /// Emit at `info`
    pub fn info(&self, message: impl Into<String>, meta: Option<Value>) {
        self.log(Level::Info, message, meta);
    }

    /// Emit at `error`
    pub fn error(&self, message: impl Into<String>, meta: Option<Value>) {
        self.log(Level::Error, message, meta);
    }

    /// Emit at `warn`
    pub fn warn(&self, message: impl Into<String>, meta: Option<Value>) {
        self.log(Level::Warn, message, meta);
    }

    /// Emit at `debug`
    pub fn debug(&self, message: impl Into<String>, meta: Option<Value>) {
        self.log(Level::Debug, message, meta);
    }

    /// Change the minimum level; applies to the next record
    pub fn set_level(&self, level: Level) {
        self.inner.logger.set_level(level);
    }

    /// Current minimum level
    #[must_use]
    pub fn level(&self) -> Level {
        self.inner.logger.level()
    }

    /// Swap in a formatter with the given indentation
    pub fn set_stringify_logs(&self, pretty_print: bool) {
        self.inner
            .logger
            .set_formatter(JsonFormatter::new(pretty_print));
    }

    /// Suppress or restore delivery to every transport
    pub fn set_silent(&self, silent: bool) {
        self.inner.logger.set_silent(silent);
    }

    /// Whether delivery is suppressed
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.inner.logger.is_silent()
    }

    /// Emit an error and its chain of sources at `error`
    pub fn log_stack_trace(&self, error: &dyn std::error::Error) {
        self.emit(
            &self.inner.logger,
            Level::Error,
            render_error_chain(error),
            None,
            None,
        );
    }

    /// Emit a multi-line rendering of `obj` at `info`, with containers nested
    /// deeper than `max_depth` collapsed
    pub fn log_nested_object<T: Serialize + ?Sized>(&self, obj: &T, max_depth: usize) {
        let rendered = match serde_json::to_value(obj) {
            Ok(value) => inspect::render(&value, max_depth),
            Err(e) => format!("[unserializable: {e}]"),
        };
        self.emit(&self.inner.logger, Level::Info, rendered, None, None);
    }

    /// Emit once through a fresh logger tagged with `context`
    pub fn log_with_context(
        &self,
        context: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        meta: Option<Value>,
    ) {
        self.context_logger(context).log(level, message, meta);
    }

    /// A logger that tags every record with `context`
    pub fn context_logger(&self, context: impl Into<String>) -> ContextLogger {
        let context = context.into();
        let logger = self
            .inner
            .logger
            .with_context(Context::new().with_field(CONTEXT_KEY, context.clone()));
        ContextLogger::new(self.clone(), context, logger)
    }

    /// Flush every transport
    pub fn flush(&self) {
        self.inner.logger.flush();
    }

    /// Merge `meta` under the service name
    pub(crate) fn enrich(&self, meta: Option<Value>) -> Fields {
        let mut fields = Fields::new();
        fields.insert(
            SERVICE_NAME_KEY.to_string(),
            Value::String(self.inner.service_name.clone()),
        );

        match meta {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                let mut displaced = Fields::new();
                for (key, value) in map {
                    if RESERVED_FIELDS.contains(&key.as_str()) {
                        displaced.insert(key, value);
                    } else if key != SERVICE_NAME_KEY {
                        fields.insert(key, value);
                    }
                }
                if !displaced.is_empty() {
                    nest_displaced(&mut fields, displaced);
                }
            }
            Some(other) => {
                fields.insert(META_KEY.to_string(), other);
            }
        }

        fields
    }

    /// Build and send a record through `logger`
    pub(crate) fn emit(
        &self,
        logger: &dyn Logger,
        level: Level,
        message: String,
        meta: Option<Value>,
        stack: Option<String>,
    ) {
        if !logger.is_enabled(level) {
            return;
        }

        let mut record = Record::new(level, message).with_fields(self.enrich(meta));
        record.stack = stack;
        logger.log(record);
    }
}

impl fmt::Debug for LogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogService")
            .field("service_name", &self.inner.service_name)
            .field("logger", &self.inner.logger)
            .field("callback", &self.inner.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

fn logger_builder(config: &LogServiceConfig) -> logservice_logger::MultiLoggerBuilder {
    let builder = MultiLogger::builder()
        .level(config.level)
        .silent(config.silent)
        .formatter(JsonFormatter::new(config.pretty_print));

    if config.enable_console {
        builder.transport(Arc::new(ConsoleTransport::new()))
    } else {
        builder
    }
}

fn build_logger(config: &LogServiceConfig) -> Result<MultiLogger> {
    let logstash = LogstashTransport::new(config.logstash_config())?;
    Ok(logger_builder(config).transport(Arc::new(logstash)).build())
}

/// Move keys that would shadow the record's own `timestamp`, `level`,
/// `message` or `stack` under `meta`. An explicit `meta` object in the same
/// payload keeps its own entries.
fn nest_displaced(fields: &mut Fields, displaced: Fields) {
    match fields.get_mut(META_KEY) {
        None => {
            fields.insert(META_KEY.to_string(), Value::Object(displaced));
        }
        Some(Value::Object(existing)) => {
            for (key, value) in displaced {
                existing.entry(key).or_insert(value);
            }
        }
        Some(other) => {
            let mut nested = Fields::new();
            nested.insert("value".to_string(), other.take());
            nested.extend(displaced);
            *other = Value::Object(nested);
        }
    }
}

/// The error's message followed by each source, one per line
fn render_error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(text, "\n    caused by: {cause}");
        source = cause.source();
    }
    text
}
