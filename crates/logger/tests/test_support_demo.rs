//! Demonstrates the test support functionality

#[cfg(feature = "test-support")]
mod tests {
    use logservice_logger::test_support::*;
    use logservice_logger::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_capture_transport() {
        let capture = CaptureTransport::new();
        let logger: Arc<dyn Logger> = Arc::new(
            MultiLogger::builder()
                .transport(Arc::new(capture.clone()))
                .build(),
        );

        logger.info("This is captured");
        logger.error("This is also captured");

        assert!(capture.contains("This is captured"));
        assert!(capture.contains("\"level\":\"ERROR\""));

        let values = capture.values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["message"], json!("This is captured"));
        assert_eq!(values[1]["level"], json!("ERROR"));

        capture.clear();
        assert!(capture.is_empty());
    }

    #[test]
    fn test_capture_with_context() {
        let capture = CaptureTransport::new();
        let logger = MultiLogger::builder()
            .transport(Arc::new(capture.clone()))
            .build();

        let scoped = logger.with_context(Context::new().with_field("requestId", "r-17"));
        scoped.warn("slow request");

        assert_eq!(capture.values()[0]["requestId"], json!("r-17"));
    }
}
