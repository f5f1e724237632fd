use dhub_logger::{LevelFilter, Logger};

#[test]
fn console_only_logger_has_no_file_guard() {
    let logger = Logger::builder()
        .name("scorekeeper-console")
        .level(LevelFilter::DEBUG)
        .init()
        .expect("logger should initialize");

    tracing::debug!("console sink only");
    assert!(logger.guard().is_none());
}
