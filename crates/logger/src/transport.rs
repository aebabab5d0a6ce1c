//! Output transport trait

use crate::Record;

/// Destination for formatted records.
///
/// Implementations must not block the caller for long; network transports
/// queue the line and deliver it in the background.
pub trait Transport: Send + Sync + 'static {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Deliver one formatted line. `record` is the source of `line`.
    fn write(&self, line: &str, record: &Record);

    /// Flush anything the transport buffers
    fn flush(&self) {}
}
