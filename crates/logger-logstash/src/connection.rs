//! Connection establishment, plain or TLS

use crate::config::LogstashConfig;
use crate::error::{Error, Result};
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::ServerName;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tokio_rustls::TlsConnector;
use tracing::{debug, warn};

/// Write half of an established connection
pub(crate) type Connection = Box<dyn AsyncWrite + Send + Unpin>;

/// Opens connections to the configured endpoint
pub(crate) struct Connector {
    config: LogstashConfig,
    tls: Option<(TlsConnector, ServerName<'static>)>,
}

impl Connector {
    /// Build a connector, preparing TLS up front so bad settings fail early
    pub(crate) fn new(config: LogstashConfig) -> Result<Self> {
        let tls = if config.ssl_enable {
            Some(tls_connector(&config.host)?)
        } else {
            None
        };

        Ok(Self { config, tls })
    }

    /// Connect, retrying until `max_connect_retries` is exhausted
    pub(crate) async fn connect_with_retries(&self) -> Result<Connection> {
        let mut attempts: u64 = 0;

        loop {
            match self.connect_once().await {
                Ok(connection) => {
                    debug!("connected to logstash at {}", self.config.addr());
                    return Ok(connection);
                }
                Err(e) => {
                    attempts += 1;

                    let exhausted = u64::try_from(self.config.max_connect_retries)
                        .is_ok_and(|max| attempts > max);
                    if exhausted {
                        return Err(Error::RetriesExhausted {
                            addr: self.config.addr(),
                            attempts,
                            last_error: e.to_string(),
                        });
                    }

                    warn!(
                        "logstash connection attempt {} to {} failed: {}",
                        attempts,
                        self.config.addr(),
                        e
                    );
                    sleep(self.config.retry_interval).await;
                }
            }
        }
    }

    async fn connect_once(&self) -> Result<Connection> {
        let stream = timeout(
            self.config.connect_timeout,
            TcpStream::connect((self.config.host.as_str(), self.config.port)),
        )
        .await
        .map_err(|_| Error::ConnectTimeout(self.config.addr()))??;

        stream.set_nodelay(true)?;

        match &self.tls {
            None => Ok(Box::new(stream)),
            Some((connector, server_name)) => {
                let stream = connector.connect(server_name.clone(), stream).await?;
                Ok(Box::new(stream))
            }
        }
    }
}

/// TLS client using the bundled web PKI roots
fn tls_connector(host: &str) -> Result<(TlsConnector, ServerName<'static>)> {
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| Error::Tls(format!("invalid server name {host:?}: {e}")))?;

    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::Tls(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok((TlsConnector::from(Arc::new(config)), server_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_rejects_invalid_server_name() {
        let result = tls_connector("not a host name!");
        assert!(matches!(result, Err(Error::Tls(_))));
    }

    #[test]
    fn test_tls_accepts_dns_name_and_ip() {
        assert!(tls_connector("logs.example.com").is_ok());
        assert!(tls_connector("10.0.0.7").is_ok());
    }

    #[tokio::test]
    async fn test_gives_up_after_retry_budget() {
        // Grab a free port, then close it so nothing listens there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = LogstashConfig::builder("127.0.0.1", port)
            .max_connect_retries(2)
            .retry_interval(std::time::Duration::from_millis(5))
            .build();
        let connector = Connector::new(config).unwrap();

        match connector.connect_with_retries().await {
            Err(Error::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 3),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("connected to a closed port"),
        }
    }
}
