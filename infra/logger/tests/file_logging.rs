use portico_domain::config::LoggingConfig;
use portico_logger::Logger;
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
#[serial]
fn file_logging_from_config_creates_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig { path: Some(log_dir.clone()), ..LoggingConfig::default() };
    let logger = Logger::from_config("portico-file-logging", &config)?.console(false).init()?;
    assert!(logger.guard().is_some());

    tracing::info!("hello from the file logger");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    assert!(fs::metadata(&log_file)?.len() > 0, "log file should not be empty");

    Ok(())
}
