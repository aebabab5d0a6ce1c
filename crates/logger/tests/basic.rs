//! Basic tests for the logger

use logservice_logger::*;
use std::sync::Arc;

#[test]
fn test_console_logger() {
    let logger = MultiLogger::builder()
        .level(Level::Debug)
        .transport(Arc::new(ConsoleTransport::new()))
        .build();

    logger.error("This is an error");
    logger.warn("This is a warning");
    logger.info("This is info");
    logger.debug("This is debug");
    logger.flush();
}

#[test]
fn test_context() {
    let base_logger: Arc<dyn Logger> = Arc::new(
        MultiLogger::builder()
            .transport(Arc::new(ConsoleTransport::new()))
            .build(),
    );
    let logger = base_logger.with_context(Context::new().with_field("context", "engine"));

    logger.info("Starting engine");
    logger.debug("Engine initialized (filtered at info)");
}

#[test]
fn test_is_enabled() {
    let logger = MultiLogger::builder().level(Level::Info).build();

    assert!(!logger.is_enabled(Level::Debug));
    assert!(logger.is_enabled(Level::Info));
    assert!(logger.is_enabled(Level::Error));
}

#[test]
fn test_no_transports() {
    let logger = MultiLogger::builder().build();

    // A logger without transports accepts records and drops them
    assert!(logger.transport_names().is_empty());
    logger.error("This goes nowhere");
    logger.flush();
}
