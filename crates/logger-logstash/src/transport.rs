//! Logstash transport implementation

use crate::config::LogstashConfig;
use crate::connection::{Connection, Connector};
use crate::error::{Error, Result};
use logservice_logger::{JsonFormatter, Record, Transport};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Lines accepted by `write` that the worker has not finished with yet
#[derive(Debug, Default)]
struct Backlog {
    pending: Mutex<u64>,
    drained: Condvar,
}

impl Backlog {
    fn add(&self) {
        *self.pending.lock() += 1;
    }

    fn done(&self) {
        let mut pending = self.pending.lock();
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            self.drained.notify_all();
        }
    }

    fn clear(&self) {
        *self.pending.lock() = 0;
        self.drained.notify_all();
    }

    fn pending(&self) -> u64 {
        *self.pending.lock()
    }

    /// Block until nothing is pending or `limit` passes; true when drained
    fn wait_drained(&self, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        let mut pending = self.pending.lock();
        while *pending > 0 {
            if self.drained.wait_until(&mut pending, deadline).timed_out() {
                return *pending == 0;
            }
        }
        true
    }
}

/// Releases flush waiters however the worker ends, including runtime shutdown
struct WorkerGuard(Arc<Backlog>);

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.0.clear();
    }
}

/// Transport that ships formatted records to Logstash as JSON lines
#[derive(Debug)]
pub struct LogstashTransport {
    /// Configuration
    config: LogstashConfig,
    /// Channel sender for formatted lines
    sender: mpsc::Sender<String>,
    /// Lines dropped because the queue was full, delivery failed or the
    /// worker had stopped
    dropped: Arc<AtomicU64>,
    /// Lines queued but not yet written
    backlog: Arc<Backlog>,
}

impl LogstashTransport {
    /// Create a transport and spawn its connection worker on the current runtime.
    ///
    /// The connection itself is opened lazily by the worker, so an unreachable
    /// endpoint does not fail construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for invalid settings, [`Error::Tls`] when
    /// TLS is enabled but cannot be set up, and [`Error::NoRuntime`] when called
    /// outside a Tokio runtime.
    pub fn new(config: LogstashConfig) -> Result<Self> {
        config.validate()?;
        let connector = Connector::new(config.clone())?;
        let handle = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let (sender, receiver) = mpsc::channel(config.channel_buffer_size);
        let dropped = Arc::new(AtomicU64::new(0));
        let backlog = Arc::new(Backlog::default());
        handle.spawn(Self::worker_loop(
            receiver,
            connector,
            config.addr(),
            dropped.clone(),
            backlog.clone(),
        ));

        Ok(Self {
            config,
            sender,
            dropped,
            backlog,
        })
    }

    /// The configuration this transport was built with
    #[must_use]
    pub const fn config(&self) -> &LogstashConfig {
        &self.config
    }

    /// Number of lines dropped so far
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of lines queued but not yet written to the connection
    #[must_use]
    pub fn pending(&self) -> u64 {
        self.backlog.pending()
    }

    /// Whether the worker has stopped (retries exhausted)
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Background worker that owns the connection
    async fn worker_loop(
        mut receiver: mpsc::Receiver<String>,
        connector: Connector,
        addr: String,
        dropped: Arc<AtomicU64>,
        backlog: Arc<Backlog>,
    ) {
        let _guard = WorkerGuard(backlog.clone());
        let mut connection: Option<Connection> = None;

        while let Some(line) = receiver.recv().await {
            match Self::deliver(&connector, &mut connection, &line).await {
                Ok(true) => backlog.done(),
                Ok(false) => {
                    dropped.fetch_add(1, Ordering::Relaxed);
                    backlog.done();
                }
                Err(e) => {
                    error!(
                        "logstash transport stopped, dropping further logs for {}: {}",
                        addr, e
                    );
                    dropped.fetch_add(1, Ordering::Relaxed);
                    backlog.done();
                    break;
                }
            }
        }

        // Whatever is still queued will never be written
        receiver.close();
        while receiver.try_recv().is_ok() {
            dropped.fetch_add(1, Ordering::Relaxed);
            backlog.done();
        }
    }

    /// Write one line, reconnecting and re-sending once if the write fails.
    ///
    /// Returns `Ok(false)` when both writes failed and the line was given up.
    async fn deliver(
        connector: &Connector,
        connection: &mut Option<Connection>,
        line: &str,
    ) -> Result<bool> {
        let mut payload = Vec::with_capacity(line.len() + 1);
        payload.extend_from_slice(line.as_bytes());
        payload.push(b'\n');

        for _ in 0..2 {
            if connection.is_none() {
                *connection = Some(connector.connect_with_retries().await?);
            }
            let Some(stream) = connection.as_mut() else {
                continue;
            };

            let written = async {
                stream.write_all(&payload).await?;
                stream.flush().await
            }
            .await;

            match written {
                Ok(()) => return Ok(true),
                Err(e) => {
                    warn!("logstash write failed, reconnecting: {}", e);
                    *connection = None;
                }
            }
        }

        Ok(false)
    }
}

impl Transport for LogstashTransport {
    fn name(&self) -> &'static str {
        "logstash"
    }

    fn write(&self, line: &str, record: &Record) {
        // json_lines framing needs one record per line
        let line = if line.contains('\n') {
            JsonFormatter::compact().format(record)
        } else {
            line.to_string()
        };

        // Count before sending so the worker can never finish a line first
        self.backlog.add();
        match self.sender.try_send(line) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_) | mpsc::error::TrySendError::Closed(_)) => {
                self.backlog.done();
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Wait until every queued line has been written, for at most
    /// `connect_timeout`.
    ///
    /// On a current-thread Tokio runtime the worker shares the calling thread
    /// and cannot make progress while it is blocked, so this returns at once
    /// without waiting. Await a yield point (or run on a multi-thread runtime)
    /// before shutting down if queued lines must reach Logstash.
    fn flush(&self) {
        if self.sender.is_closed() || self.backlog.pending() == 0 {
            return;
        }

        let limit = self.config.connect_timeout;
        let drained = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::CurrentThread => {
                debug!("logstash flush skipped on a current-thread runtime");
                return;
            }
            Ok(_) if !std::thread::panicking() => {
                tokio::task::block_in_place(|| self.backlog.wait_drained(limit))
            }
            _ => self.backlog.wait_drained(limit),
        };

        if !drained {
            warn!(
                "logstash flush timed out with {} lines still queued",
                self.backlog.pending()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_backlog_wait_returns_once_drained() {
        let backlog = Arc::new(Backlog::default());
        backlog.add();
        backlog.add();

        let worker = {
            let backlog = backlog.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                backlog.done();
                backlog.done();
            })
        };

        assert!(backlog.wait_drained(Duration::from_secs(5)));
        assert_eq!(backlog.pending(), 0);
        worker.join().unwrap();
    }

    #[test]
    fn test_backlog_wait_times_out() {
        let backlog = Backlog::default();
        backlog.add();

        assert!(!backlog.wait_drained(Duration::from_millis(20)));
        assert_eq!(backlog.pending(), 1);

        backlog.clear();
        assert!(backlog.wait_drained(Duration::from_millis(20)));
    }
}
