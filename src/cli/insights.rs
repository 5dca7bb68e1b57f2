//! Behavior insights command

use super::{emit, read_input, OutputFormat};
use crate::config::InsightsConfig;
use crate::insights::{compute_behavior_insights, compute_behavior_insights_at};
use crate::journal::{moods_from_json, parse_timestamp, trades_from_json};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// JSON array of trades (`-` for stdin)
    #[arg(long)]
    pub trades: PathBuf,

    /// JSON array of mood entries
    #[arg(long)]
    pub moods: Option<PathBuf>,

    /// Window length in days (defaults to the configured period)
    #[arg(long)]
    pub period_days: Option<u32>,

    /// End of the window (RFC 3339), defaults to now
    #[arg(long)]
    pub now: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl InsightsArgs {
    pub fn execute(&self, config: &InsightsConfig) -> anyhow::Result<()> {
        let trades = trades_from_json(&read_input(&self.trades)?)?;
        let moods = match &self.moods {
            Some(path) => moods_from_json(&read_input(path)?)?,
            None => Vec::new(),
        };
        let period_days = self.period_days.unwrap_or(config.period_days);

        tracing::info!(
            trades = trades.len(),
            moods = moods.len(),
            period_days,
            "Computing behavior insights"
        );

        let insights = match &self.now {
            Some(raw) => {
                let now = parse_timestamp(raw)
                    .ok_or_else(|| anyhow::anyhow!("Invalid --now timestamp: {}", raw))?;
                compute_behavior_insights_at(&trades, &moods, period_days, now)
            }
            None => compute_behavior_insights(&trades, &moods, period_days),
        };

        emit(self.format, &insights, |i| i.format_table())
    }
}
