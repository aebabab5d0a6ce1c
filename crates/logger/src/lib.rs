//! Structured, multi-transport logger used by `logservice`.
//!
//! A [`MultiLogger`] filters records by [`Level`], renders them with a
//! [`JsonFormatter`] and hands each rendered line to every configured
//! [`Transport`]. Child loggers created with [`Logger::with_context`] share the
//! parent's level, silence flag and formatter, and add their own fields.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod console;
mod context;
mod format;
mod level;
mod logger;
mod multi;
mod record;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use console::ConsoleTransport;
pub use context::Context;
pub use format::{JsonFormatter, RESERVED_FIELDS};
pub use level::{Level, ParseLevelError};
pub use logger::{Logger, LoggerExt};
pub use multi::{MultiLogger, MultiLoggerBuilder};
pub use record::Record;
pub use transport::Transport;

/// Open mapping of field names to JSON values carried by every record.
pub type Fields = serde_json::Map<String, serde_json::Value>;
