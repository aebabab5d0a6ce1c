//! Logstash transport for `logservice-logger`
//!
//! Ships every formatted record as one line of JSON to a Logstash `tcp` input
//! (`json_lines` codec), optionally over TLS. Writes never block the caller:
//! lines are queued on a bounded channel and a background Tokio task owns the
//! connection, reconnecting and retrying as configured.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod connection;
mod error;
mod transport;

pub use config::{LogstashConfig, LogstashConfigBuilder};
pub use error::{Error, Result};
pub use transport::LogstashTransport;
