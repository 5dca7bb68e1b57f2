//! P&L, metrics and score commands

use super::{emit, read_input, OutputFormat};
use crate::analytics::{analyze_trades, TradeStats};
use crate::journal::{trades_from_json, Side};
use crate::pnl::{calculate_pnl, PnlBreakdown};
use crate::score::{calculate_trading_score, score_color, score_label, ScoreInputs};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PnlArgs {
    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Exit price
    #[arg(long)]
    pub exit: Decimal,

    /// Position size
    #[arg(long)]
    pub quantity: Decimal,

    /// Trade direction: long/buy or short/sell
    #[arg(long, default_value = "long")]
    pub direction: Side,

    /// Exchange fees
    #[arg(long)]
    pub fees: Option<Decimal>,

    /// Broker commissions
    #[arg(long)]
    pub commissions: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl PnlArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let breakdown = calculate_pnl(
            self.entry,
            self.exit,
            self.quantity,
            self.direction,
            self.fees,
            self.commissions,
        );
        emit(self.format, &breakdown, |b| format_pnl(self.direction, b))
    }
}

fn format_pnl(direction: Side, b: &PnlBreakdown) -> String {
    format!(
        r#"
══════════════════════════════════════════════════════
                    P&L ({})
══════════════════════════════════════════════════════
Gross P&L:        {:+}
Fees:             {}
Net P&L:          {:+}
Per Contract:     {:+}
Return:           {:+}%
"#,
        direction,
        b.gross_pnl,
        b.total_fees,
        b.net_pnl,
        b.pnl_per_contract.round_dp(4),
        b.pnl_percentage.round_dp(2),
    )
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// JSON array of trades (`-` for stdin)
    #[arg(long)]
    pub trades: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl MetricsArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let trades = trades_from_json(&read_input(&self.trades)?)?;
        tracing::info!(trades = trades.len(), "Analyzing trades");
        let report = analyze_trades(&trades);
        emit(self.format, &report, |r| r.format_table())
    }
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON array of trades (`-` for stdin); overrides the explicit inputs
    #[arg(long)]
    pub trades: Option<PathBuf>,

    /// Win rate percentage
    #[arg(long, default_value = "0")]
    pub win_rate: f64,

    /// Profit factor
    #[arg(long, default_value = "0")]
    pub profit_factor: f64,

    /// Number of trades taken
    #[arg(long, default_value = "0")]
    pub total_trades: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Score with its display band
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    inputs: ScoreInputs,
    score: u8,
    label: &'static str,
    color: &'static str,
}

impl ScoreArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let inputs = match &self.trades {
            Some(path) => {
                let trades = trades_from_json(&read_input(path)?)?;
                TradeStats::from_trades(&trades).score_inputs()
            }
            None => ScoreInputs {
                win_rate: self.win_rate,
                profit_factor: self.profit_factor,
                total_trades: self.total_trades,
            },
        };

        let score = calculate_trading_score(&inputs);
        let report = ScoreReport {
            inputs,
            score,
            label: score_label(score),
            color: score_color(score),
        };
        emit(self.format, &report, |r| {
            format!(
                "Trading Score: {}/100 ({})\n  Win Rate: {:.1}%  Profit Factor: {:.2}  Trades: {}",
                r.score, r.label, r.inputs.win_rate, r.inputs.profit_factor, r.inputs.total_trades
            )
        })
    }
}
