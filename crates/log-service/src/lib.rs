//! Service-scoped JSON logging facade
//!
//! [`LogService`] stamps a fixed `serviceName` onto every record, renders
//! records as JSON and ships them to Logstash, optionally echoing them to the
//! console. It owns one [`MultiLogger`](logservice_logger::MultiLogger) whose
//! level, silence and formatting can be changed at runtime.
//!
//! # Example
//! ```no_run
//! use logservice::{Level, LogService, LogServiceConfig};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = LogServiceConfig::builder("billing", "logstash.internal", 5000)
//!     .level(Level::Info)
//!     .enable_console(true)
//!     .build();
//! let logs = LogService::new(config);
//!
//! logs.warn("low balance", Some(json!({ "account": 42 })));
//! logs.log_with_context("req-7f3a", Level::Info, "charge accepted", None);
//! # }
//! ```

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod context;
mod error;
mod global;
mod inspect;
mod service;
mod unhandled;

#[cfg(feature = "tracing-compat")]
pub mod compat;

pub use config::{HookLevel, LogServiceConfig, LogServiceConfigBuilder, NotifyHook};
pub use context::ContextLogger;
pub use error::{Error, Result};
pub use service::LogService;

pub use logservice_logger::{Fields, Level, ParseLevelError};

/// Field carrying the service name on every record
pub const SERVICE_NAME_KEY: &str = "serviceName";

/// Field carrying the scope of a context logger
pub const CONTEXT_KEY: &str = "context";

/// Field carrying `meta` values that cannot be merged at the top level
pub const META_KEY: &str = "meta";
