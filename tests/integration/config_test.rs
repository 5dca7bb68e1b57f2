//! Integration tests for configuration loading

use journal_risk::config::Config;
use journal_risk::policy::ExecutionMode;
use journal_risk::telemetry::LogFormat;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [telemetry]
        log_level = "journal_risk=debug"
        log_format = "json"

        [policy]
        manifest_base_url = "http://manifests.internal"
        fetch_timeout_ms = 300
        environment = "live"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.telemetry.log_level, "journal_risk=debug");
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
    assert_eq!(config.insights.period_days, 30);
    assert_eq!(config.policy.fetch_timeout(), Duration::from_millis(300));
    assert_eq!(config.policy.environment, ExecutionMode::Live);
}

#[test]
fn test_load_invalid_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[insights\nperiod_days = ").unwrap();
    assert!(Config::load(file.path()).is_err());
}

#[test]
fn test_load_wrong_type() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[insights]\nperiod_days = \"thirty\"").unwrap();
    assert!(Config::load(file.path()).is_err());
}
