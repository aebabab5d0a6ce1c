//! Log service configuration

use logservice_logger::Level;
use logservice_logger_logstash::LogstashConfig;
use std::fmt;
use std::sync::Arc;

/// Level reported to the notify hook.
///
/// `info` is reported as [`HookLevel::Log`]; the other levels pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookLevel {
    /// An `error` record
    Error,
    /// A `warn` record
    Warn,
    /// A `debug` record
    Debug,
    /// An `info` record
    Log,
}

impl HookLevel {
    /// Name handed to hook consumers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Debug => "debug",
            Self::Log => "log",
        }
    }
}

impl From<Level> for HookLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Self::Error,
            Level::Warn => Self::Warn,
            Level::Debug => Self::Debug,
            Level::Info => Self::Log,
        }
    }
}

impl fmt::Display for HookLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked with `(level, message)` before each `log` call is emitted
pub type NotifyHook = Arc<dyn Fn(HookLevel, &str) + Send + Sync>;

/// Settings for a [`LogService`](crate::LogService)
#[derive(Clone)]
pub struct LogServiceConfig {
    /// Name stamped on every record as `serviceName`
    pub service_name: String,
    /// Logstash host
    pub logstash_host: String,
    /// Logstash port
    pub logstash_port: u16,
    /// Reconnection attempts before the sink gives up; `-1` retries forever
    pub max_connect_retries: i32,
    /// Connect to Logstash over TLS
    pub ssl_enable: bool,
    /// Initial minimum level
    pub level: Level,
    /// Indent JSON output with two spaces
    pub pretty_print: bool,
    /// Start with emission suppressed
    pub silent: bool,
    /// Echo records to stdout
    pub enable_console: bool,
    /// Optional notify hook
    pub callback: Option<NotifyHook>,
}

impl LogServiceConfig {
    /// Start building a config; every optional setting has its default
    pub fn builder(
        service_name: impl Into<String>,
        logstash_host: impl Into<String>,
        logstash_port: u16,
    ) -> LogServiceConfigBuilder {
        LogServiceConfigBuilder {
            config: Self {
                service_name: service_name.into(),
                logstash_host: logstash_host.into(),
                logstash_port,
                max_connect_retries: -1,
                ssl_enable: false,
                level: Level::Info,
                pretty_print: false,
                silent: false,
                enable_console: false,
                callback: None,
            },
        }
    }

    /// Transport settings derived from this config
    #[must_use]
    pub fn logstash_config(&self) -> LogstashConfig {
        LogstashConfig::builder(self.logstash_host.clone(), self.logstash_port)
            .ssl_enable(self.ssl_enable)
            .max_connect_retries(self.max_connect_retries)
            .build()
    }
}

impl fmt::Debug for LogServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogServiceConfig")
            .field("service_name", &self.service_name)
            .field("logstash_host", &self.logstash_host)
            .field("logstash_port", &self.logstash_port)
            .field("max_connect_retries", &self.max_connect_retries)
            .field("ssl_enable", &self.ssl_enable)
            .field("level", &self.level)
            .field("pretty_print", &self.pretty_print)
            .field("silent", &self.silent)
            .field("enable_console", &self.enable_console)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Builder for [`LogServiceConfig`]
#[derive(Clone)]
pub struct LogServiceConfigBuilder {
    config: LogServiceConfig,
}

impl LogServiceConfigBuilder {
    /// Set the reconnection budget; `-1` retries forever
    #[must_use]
    pub const fn max_connect_retries(mut self, retries: i32) -> Self {
        self.config.max_connect_retries = retries;
        self
    }

    /// Enable or disable TLS to Logstash
    #[must_use]
    pub const fn ssl_enable(mut self, enable: bool) -> Self {
        self.config.ssl_enable = enable;
        self
    }

    /// Set the initial minimum level
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    /// Indent JSON output
    #[must_use]
    pub const fn pretty_print(mut self, pretty: bool) -> Self {
        self.config.pretty_print = pretty;
        self
    }

    /// Start silenced
    #[must_use]
    pub const fn silent(mut self, silent: bool) -> Self {
        self.config.silent = silent;
        self
    }

    /// Echo records to stdout
    #[must_use]
    pub const fn enable_console(mut self, enable: bool) -> Self {
        self.config.enable_console = enable;
        self
    }

    /// Install a notify hook
    #[must_use]
    pub fn callback(mut self, callback: impl Fn(HookLevel, &str) + Send + Sync + 'static) -> Self {
        self.config.callback = Some(Arc::new(callback));
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> LogServiceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = LogServiceConfig::builder("billing", "logstash.internal", 5000).build();

        assert_eq!(config.service_name, "billing");
        assert_eq!(config.max_connect_retries, -1);
        assert!(!config.ssl_enable);
        assert_eq!(config.level, Level::Info);
        assert!(!config.pretty_print);
        assert!(!config.silent);
        assert!(!config.enable_console);
        assert!(config.callback.is_none());
    }

    #[test]
    fn test_logstash_config_carries_connection_settings() {
        let config = LogServiceConfig::builder("billing", "logstash.internal", 5044)
            .ssl_enable(true)
            .max_connect_retries(5)
            .build();

        let logstash = config.logstash_config();
        assert_eq!(logstash.addr(), "logstash.internal:5044");
        assert!(logstash.ssl_enable);
        assert_eq!(logstash.max_connect_retries, 5);
    }

    #[test]
    fn test_hook_level_normalization() {
        assert_eq!(HookLevel::from(Level::Error).as_str(), "error");
        assert_eq!(HookLevel::from(Level::Warn).as_str(), "warn");
        assert_eq!(HookLevel::from(Level::Debug).as_str(), "debug");
        assert_eq!(HookLevel::from(Level::Info).as_str(), "log");
    }

    #[test]
    fn test_debug_hides_callback() {
        let config = LogServiceConfig::builder("billing", "localhost", 5000)
            .callback(|_, _| {})
            .build();

        let rendered = format!("{config:?}");
        assert!(rendered.contains("<fn>"));
        assert!(rendered.contains("billing"));
    }
}
