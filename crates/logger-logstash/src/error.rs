//! Error types for the Logstash transport

use thiserror::Error;

/// Errors that can occur in the Logstash transport
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// TLS connector could not be built
    #[error("TLS setup failed: {0}")]
    Tls(String),

    /// The transport was created outside a Tokio runtime
    #[error("no Tokio runtime available to drive the logstash connection")]
    NoRuntime,

    /// A single connection attempt did not finish in time
    #[error("connection to {0} timed out")]
    ConnectTimeout(String),

    /// Connection attempts exhausted `max_connect_retries`
    #[error("gave up connecting to {addr} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Endpoint that could not be reached
        addr: String,
        /// Number of attempts made
        attempts: u64,
        /// Error from the final attempt
        last_error: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
