//! CLI interface for journal-risk
//!
//! Provides subcommands for:
//! - `pnl`: P&L for a single round trip
//! - `metrics`: Trade statistics and risk-adjusted metrics
//! - `score`: Composite trading score
//! - `insights`: Behavior insights over a recent window
//! - `evaluate`: Widget action risk policy
//! - `config`: Show configuration

mod analyze;
mod evaluate;
mod insights;

pub use analyze::{MetricsArgs, PnlArgs, ScoreArgs};
pub use evaluate::EvaluateArgs;
pub use insights::InsightsArgs;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "journal-risk")]
#[command(about = "Behavioral and risk analytics for a trading journal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// P&L for a single round trip
    Pnl(PnlArgs),
    /// Trade statistics and risk-adjusted metrics
    Metrics(MetricsArgs),
    /// Composite trading score
    Score(ScoreArgs),
    /// Behavior insights over a recent window
    Insights(InsightsArgs),
    /// Evaluate a widget action against its risk manifest
    Evaluate(EvaluateArgs),
    /// Show configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Print a value as JSON, or its table rendering
pub(crate) fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => println!("{}", table(value)),
    }
    Ok(())
}

/// Read a file, or stdin when the path is `-`
pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
