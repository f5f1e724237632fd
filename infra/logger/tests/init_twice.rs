use dhub_logger::{LevelFilter, Logger, LoggerError};

// Each integration test binary owns the process-global subscriber, so the
// double-init case lives in a file of its own.
#[test]
fn second_init_reports_subscriber_conflict() {
    let _first = Logger::builder()
        .name("scorekeeper-first")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");

    let err = Logger::builder()
        .name("scorekeeper-second")
        .init()
        .expect_err("second init must fail while the first subscriber is installed");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err}");
}
