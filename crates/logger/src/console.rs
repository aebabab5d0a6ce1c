//! Console transport

use crate::{Record, Transport};
use parking_lot::Mutex;
use std::io::Write;

/// Transport that echoes every formatted line to stdout
#[derive(Debug)]
pub struct ConsoleTransport {
    /// Lock for stdout (to prevent interleaving)
    stdout: Mutex<std::io::Stdout>,
}

impl ConsoleTransport {
    /// Create a new console transport
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(std::io::stdout()),
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ConsoleTransport {
    fn name(&self) -> &'static str {
        "console"
    }

    fn write(&self, line: &str, _record: &Record) {
        let mut stdout = self.stdout.lock();
        let _ = stdout.write_all(line.as_bytes());
        let _ = stdout.write_all(b"\n");
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = self.stdout.lock().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn test_console_transport_writes() {
        // Only verifies that writing does not panic
        let console = ConsoleTransport::new();
        console.write("{\"message\":\"hello\"}", &Record::new(Level::Info, "hello"));
        console.flush();
        assert_eq!(console.name(), "console");
    }
}
