//! Error types for the log service

use thiserror::Error;

/// Errors surfaced by [`LogService::try_new`](crate::LogService::try_new)
#[derive(Debug, Error)]
pub enum Error {
    /// The Logstash transport could not be built
    #[error("logstash sink unavailable: {0}")]
    Sink(#[from] logservice_logger_logstash::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
