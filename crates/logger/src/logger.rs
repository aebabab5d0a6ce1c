//! Core logger trait

use crate::{Context, Level, Record};
use std::sync::Arc;

/// Core logger trait
pub trait Logger: Send + Sync + 'static {
    /// Log a record
    fn log(&self, record: Record);

    /// Flush any buffered logs
    fn flush(&self);

    /// Check if a level is enabled (for fast filtering)
    fn is_enabled(&self, level: Level) -> bool;

    /// Create a child logger with additional context
    fn with_context(&self, context: Context) -> Arc<dyn Logger>;
}

/// Extension trait for convenient logging methods
pub trait LoggerExt: Logger {
    /// Log an error
    fn error(&self, msg: impl Into<String>) {
        if self.is_enabled(Level::Error) {
            self.log(Record::new(Level::Error, msg));
        }
    }

    /// Log a warning
    fn warn(&self, msg: impl Into<String>) {
        if self.is_enabled(Level::Warn) {
            self.log(Record::new(Level::Warn, msg));
        }
    }

    /// Log info
    fn info(&self, msg: impl Into<String>) {
        if self.is_enabled(Level::Info) {
            self.log(Record::new(Level::Info, msg));
        }
    }

    /// Log debug
    fn debug(&self, msg: impl Into<String>) {
        if self.is_enabled(Level::Debug) {
            self.log(Record::new(Level::Debug, msg));
        }
    }
}

// Implement for all loggers
impl<T: Logger + ?Sized> LoggerExt for T {}
