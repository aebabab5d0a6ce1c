//! Context-scoped loggers

use crate::LogService;
use logservice_logger::{Level, Logger};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Logger that tags every record with a fixed `context` field.
///
/// Shares level, silence and formatting with the [`LogService`] it came
/// from. Records still carry `serviceName`; the notify hook is not invoked.
#[derive(Clone)]
pub struct ContextLogger {
    service: LogService,
    context: String,
    logger: Arc<dyn Logger>,
}

impl ContextLogger {
    pub(crate) fn new(service: LogService, context: String, logger: Arc<dyn Logger>) -> Self {
        Self {
            service,
            context,
            logger,
        }
    }

    /// The context value stamped on records
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Emit a record at `level`
    pub fn log(&self, level: Level, message: impl Into<String>, meta: Option<Value>) {
        self.service
            .emit(self.logger.as_ref(), level, message.into(), meta, None);
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
}

impl fmt::Debug for ContextLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLogger")
            .field("service_name", &self.service.service_name())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
