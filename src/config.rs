//! Configuration types for journal-risk

use crate::insights::DEFAULT_PERIOD_DAYS;
use crate::policy::{ExecutionMode, DEFAULT_FETCH_TIMEOUT};
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Log filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Behavior insights configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    /// Analysis window in days
    #[serde(default = "default_period_days")]
    pub period_days: u32,
}

fn default_period_days() -> u32 {
    DEFAULT_PERIOD_DAYS
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            period_days: DEFAULT_PERIOD_DAYS,
        }
    }
}

/// Widget policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Manifest service base URL; without it every evaluation uses the default manifest
    #[serde(default)]
    pub manifest_base_url: Option<String>,

    /// Bound on a manifest fetch (milliseconds)
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Environment assumed when the caller does not specify one
    #[serde(default)]
    pub environment: ExecutionMode,
}

fn default_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_millis() as u64
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            manifest_base_url: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
            environment: ExecutionMode::Paper,
        }
    }
}

impl PolicyConfig {
    /// Fetch timeout as a duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
