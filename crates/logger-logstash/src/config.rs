//! Configuration for the Logstash transport

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for a Logstash `tcp` input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogstashConfig {
    /// Logstash host name or IP address
    pub host: String,
    /// Logstash port
    pub port: u16,
    /// Wrap the connection in TLS
    pub ssl_enable: bool,
    /// Reconnection attempts before giving up; `-1` retries forever
    pub max_connect_retries: i32,
    /// Pause between connection attempts
    pub retry_interval: Duration,
    /// Upper bound for a single connection attempt
    pub connect_timeout: Duration,
    /// Lines queued before new ones are dropped
    pub channel_buffer_size: usize,
}

impl Default for LogstashConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            ssl_enable: false,
            max_connect_retries: -1,
            retry_interval: Duration::from_millis(100),
            connect_timeout: Duration::from_secs(5),
            channel_buffer_size: 1024,
        }
    }
}

impl LogstashConfig {
    /// Start building a config for the given endpoint
    pub fn builder(host: impl Into<String>, port: u16) -> LogstashConfigBuilder {
        LogstashConfigBuilder {
            config: Self {
                host: host.into(),
                port,
                ..Self::default()
            },
        }
    }

    /// `host:port`, for diagnostics
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether connection retries never run out
    #[must_use]
    pub const fn retries_unlimited(&self) -> bool {
        self.max_connect_retries < 0
    }

    /// Check the values a transport cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty host, port 0, a zero-sized
    /// channel or a retry count below `-1`.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Configuration("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(Error::Configuration("port must not be 0".to_string()));
        }
        if self.channel_buffer_size == 0 {
            return Err(Error::Configuration(
                "channel_buffer_size must be at least 1".to_string(),
            ));
        }
        if self.max_connect_retries < -1 {
            return Err(Error::Configuration(format!(
                "max_connect_retries must be -1 or more, got {}",
                self.max_connect_retries
            )));
        }
        Ok(())
    }
}

/// Builder for [`LogstashConfig`]
#[derive(Debug, Clone)]
pub struct LogstashConfigBuilder {
    config: LogstashConfig,
}

impl LogstashConfigBuilder {
    /// Enable or disable TLS
    #[must_use]
    pub const fn ssl_enable(mut self, enable: bool) -> Self {
        self.config.ssl_enable = enable;
        self
    }

    /// Set the reconnection budget; `-1` retries forever
    #[must_use]
    pub const fn max_connect_retries(mut self, retries: i32) -> Self {
        self.config.max_connect_retries = retries;
        self
    }

    /// Set the pause between connection attempts
    #[must_use]
    pub const fn retry_interval(mut self, interval: Duration) -> Self {
        self.config.retry_interval = interval;
        self
    }

    /// Set the per-attempt connection timeout
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the queue size
    #[must_use]
    pub const fn channel_buffer_size(mut self, size: usize) -> Self {
        self.config.channel_buffer_size = size;
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> LogstashConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = LogstashConfig::builder("logs.internal", 5044).build();

        assert_eq!(config.addr(), "logs.internal:5044");
        assert!(!config.ssl_enable);
        assert!(config.retries_unlimited());
        assert_eq!(config.retry_interval, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = LogstashConfig::builder("logs.internal", 5044)
            .ssl_enable(true)
            .max_connect_retries(3)
            .retry_interval(Duration::from_millis(10))
            .channel_buffer_size(8)
            .build();

        assert!(config.ssl_enable);
        assert!(!config.retries_unlimited());
        assert_eq!(config.max_connect_retries, 3);
        assert_eq!(config.channel_buffer_size, 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let empty_host = LogstashConfig::builder("  ", 5044).build();
        assert!(matches!(empty_host.validate(), Err(Error::Configuration(_))));

        let zero_port = LogstashConfig::builder("localhost", 0).build();
        assert!(matches!(zero_port.validate(), Err(Error::Configuration(_))));

        let no_buffer = LogstashConfig::builder("localhost", 5044)
            .channel_buffer_size(0)
            .build();
        assert!(matches!(no_buffer.validate(), Err(Error::Configuration(_))));

        let bad_retries = LogstashConfig::builder("localhost", 5044)
            .max_connect_retries(-2)
            .build();
        assert!(matches!(bad_retries.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LogstashConfig =
            serde_json::from_str(r#"{"host":"elk","port":5959,"ssl_enable":true}"#).unwrap();

        assert_eq!(config.addr(), "elk:5959");
        assert!(config.ssl_enable);
        assert_eq!(config.max_connect_retries, -1);
    }
}
