//! Reporting of panics that nothing else handles

use crate::LogService;
use logservice_logger::Level;
use std::backtrace::Backtrace;
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicBool, Ordering};

static INSTALLED: AtomicBool = AtomicBool::new(false);

impl LogService {
    /// Report every panic in the process through this service.
    ///
    /// Each panic is emitted at `error` as `Uncaught Exception thrown: <payload>`
    /// with its location and a backtrace as the stack, then handed to the
    /// previously installed hook. Only the first call in a process installs the
    /// hook; the return value says whether this call did.
    pub fn log_unhandled_errors(&self) -> bool {
        if INSTALLED.swap(true, Ordering::AcqRel) {
            return false;
        }

        let service = self.clone();
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            service.emit(
                service.logger(),
                Level::Error,
                format!("Uncaught Exception thrown: {}", payload_text(info)),
                None,
                Some(stack_text(info)),
            );
            service.flush();

            previous(info);
        }));

        true
    }
}

fn payload_text(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

fn stack_text(info: &PanicHookInfo<'_>) -> String {
    let backtrace = Backtrace::force_capture();
    match info.location() {
        Some(location) => format!("at {location}\n{backtrace}"),
        None => backtrace.to_string(),
    }
}
