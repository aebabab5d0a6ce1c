//! Process-wide shared instance

use crate::{LogService, LogServiceConfig};
use std::sync::OnceLock;

static INSTANCE: OnceLock<LogService> = OnceLock::new();

impl LogService {
    /// The process-wide instance, created from `config` on first use.
    ///
    /// Later calls return the same instance and ignore their `config`.
    /// Construction follows [`LogService::new`], including its fallback.
    pub fn get_instance(config: LogServiceConfig) -> &'static Self {
        INSTANCE.get_or_init(|| Self::new(config))
    }

    /// The process-wide instance, if one has been created
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        INSTANCE.get()
    }
}
