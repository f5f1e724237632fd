use dhub_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_layer_writes_a_rolling_log() -> Result<(), Box<dyn std::error::Error>> {
    let scratch = tempdir()?;
    let log_dir = scratch.path().join("logs");

    let logger = Logger::builder()
        .name("scorekeeper-file")
        .console(false)
        .path(&log_dir)
        .max_files(3)
        .level(LevelFilter::INFO)
        .init()?;

    tracing::info!(team = "Team1", points = 25, "hand recorded");

    // Dropping the handle flushes the non-blocking writer.
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().is_some_and(|ext| ext == "log"))
        .expect("a .log file should exist");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("hand recorded"), "log line should be flushed to disk");
    let name = log_file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("scorekeeper-file"), "file name should carry the logger name");

    Ok(())
}
