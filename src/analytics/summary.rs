//! Trade statistics and the analytics report

use super::advanced::RiskMetrics;
use super::stats::{percent_of, safe_div, to_f64};
use crate::journal::Trade;
use crate::score::{score_label, ScoreInputs};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Basic win/loss statistics for a trade collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    /// Number of trades
    pub total_trades: usize,
    /// Trades with `pnl > 0`
    pub winning_trades: usize,
    /// Trades with `pnl <= 0`
    pub losing_trades: usize,
    /// Winning trades as a percentage (0-100)
    pub win_rate: f64,
    /// Gross profit over gross absolute loss, 0 when there are no losses
    pub profit_factor: f64,
    /// Sum of winning P&L
    pub gross_profit: Decimal,
    /// Sum of absolute losing P&L
    pub gross_loss: Decimal,
    /// Sum of all P&L
    pub total_pnl: Decimal,
    /// Mean P&L per trade
    pub average_pnl: Decimal,
}

impl TradeStats {
    /// Derive statistics from trades
    ///
    /// Sums saturate at the decimal bounds rather than overflowing.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut stats = Self {
            total_trades: trades.len(),
            ..Self::default()
        };

        for trade in trades {
            stats.total_pnl = stats.total_pnl.saturating_add(trade.pnl);
            if trade.is_win() {
                stats.winning_trades += 1;
                stats.gross_profit = stats.gross_profit.saturating_add(trade.pnl);
            } else {
                stats.losing_trades += 1;
                stats.gross_loss = stats.gross_loss.saturating_add(trade.pnl.abs());
            }
        }

        stats.win_rate = percent_of(stats.winning_trades, stats.total_trades);
        stats.profit_factor = safe_div(to_f64(stats.gross_profit), to_f64(stats.gross_loss));
        if stats.total_trades > 0 {
            stats.average_pnl = stats
                .total_pnl
                .checked_div(Decimal::from(stats.total_trades))
                .unwrap_or(Decimal::ZERO);
        }
        stats
    }

    /// Inputs for the trading score
    pub fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            win_rate: self.win_rate,
            profit_factor: self.profit_factor,
            total_trades: self.total_trades as u64,
        }
    }
}

/// Combined statistics, risk metrics and score for one trade collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Win/loss statistics
    pub stats: TradeStats,
    /// Risk-adjusted metrics
    pub metrics: RiskMetrics,
    /// Trading score 0-100
    pub score: u8,
    /// Label for the score band
    pub score_label: String,
}

impl AnalyticsReport {
    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               TRADING ANALYTICS
══════════════════════════════════════════════════════

PERFORMANCE
───────────────────────────────────────────────────────
Total P&L:        {:+.2}
Average P&L:      {:+.2}
Win Rate:         {:.1}%
Profit Factor:    {:.2}
Trading Score:    {} ({})

RISK
───────────────────────────────────────────────────────
Expectancy:       {:+.2}
Kelly (full):     {:.4}
Kelly (half):     {:.4}
Sharpe Ratio:     {:.2}
Sortino Ratio:    {:.2}
Calmar Ratio:     {:.2}
Max Drawdown:     {:.2}

ACTIVITY
───────────────────────────────────────────────────────
Total Trades:     {}
Winners:          {}
Losers:           {}
══════════════════════════════════════════════════════
"#,
            self.stats.total_pnl,
            self.stats.average_pnl,
            self.stats.win_rate,
            self.stats.profit_factor,
            self.score,
            self.score_label,
            self.metrics.expectancy,
            self.metrics.kelly_full,
            self.metrics.kelly_half,
            self.metrics.sharpe_ratio,
            self.metrics.sortino_ratio,
            self.metrics.calmar_ratio,
            self.metrics.max_drawdown,
            self.stats.total_trades,
            self.stats.winning_trades,
            self.stats.losing_trades,
        )
    }
}

/// Build the full analytics report for a trade collection
pub fn analyze_trades(trades: &[Trade]) -> AnalyticsReport {
    let stats = TradeStats::from_trades(trades);
    let metrics = super::calculate_advanced_metrics(trades);
    let score = crate::score::calculate_trading_score(&stats.score_inputs());
    AnalyticsReport {
        score_label: score_label(score).to_string(),
        stats,
        metrics,
        score,
    }
}
