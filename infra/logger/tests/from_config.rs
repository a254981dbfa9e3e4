use grok_domain::config::LoggingConfig;
use grok_logger::Logger;

#[test]
fn from_config_with_path_creates_file_guard() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let config = LoggingConfig {
        name: "grok-from-config".to_owned(),
        level: "debug".to_owned(),
        console: false,
        path: Some(tmp_dir.path().join("logs")),
        json: true,
        env_filter: Some("grok=trace".to_owned()),
    };

    let logger = Logger::from_config(&config)?;
    assert!(logger.guard().is_some(), "file output should keep a worker guard");
    assert!(tmp_dir.path().join("logs").is_dir());

    Ok(())
}
