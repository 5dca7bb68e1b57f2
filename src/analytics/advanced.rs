//! Advanced risk metrics from a trade collection

use super::stats::{downside_deviation, finite_or_zero, mean, population_std_dev, safe_div, to_f64};
use crate::journal::Trade;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trading days per year used to annualize daily ratios
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year used for Calmar annualization
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Derived risk metrics
///
/// Every field is finite. Degenerate inputs (no trades, zero variance, no
/// drawdown) produce 0 rather than NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Average currency result per trade
    pub expectancy: f64,
    /// Full Kelly fraction
    pub kelly_full: f64,
    /// Half Kelly fraction
    pub kelly_half: f64,
    /// Annualized Sharpe ratio of daily P&L
    pub sharpe_ratio: f64,
    /// Annualized Sortino ratio of daily P&L
    pub sortino_ratio: f64,
    /// Annualized return over max drawdown
    pub calmar_ratio: f64,
    /// Largest peak-to-trough decline of cumulative P&L, in currency
    pub max_drawdown: f64,
    /// Always 0: no starting balance is known at this layer
    pub max_drawdown_percent: f64,
}

impl RiskMetrics {
    /// Iterate over every field, used to assert the no-NaN invariant
    pub fn values(&self) -> [f64; 8] {
        [
            self.expectancy,
            self.kelly_full,
            self.kelly_half,
            self.sharpe_ratio,
            self.sortino_ratio,
            self.calmar_ratio,
            self.max_drawdown,
            self.max_drawdown_percent,
        ]
    }
}

/// Calculate expectancy, Kelly, Sharpe/Sortino/Calmar and max drawdown
pub fn calculate_advanced_metrics(trades: &[Trade]) -> RiskMetrics {
    if trades.is_empty() {
        return RiskMetrics::default();
    }

    let (wins, losses): (Vec<f64>, Vec<f64>) = trades
        .iter()
        .map(|t| to_f64(t.pnl))
        .partition(|pnl| *pnl > 0.0);

    let total = trades.len() as f64;
    let avg_win = mean(&wins);
    let avg_loss = mean(&losses.iter().map(|l| l.abs()).collect::<Vec<_>>());
    let win_rate = wins.len() as f64 / total;
    let loss_rate = losses.len() as f64 / total;

    let expectancy = finite_or_zero(avg_win * win_rate - avg_loss * loss_rate);

    let payoff = safe_div(avg_win, avg_loss);
    let kelly_full = if payoff == 0.0 {
        0.0
    } else {
        finite_or_zero(win_rate - (1.0 - win_rate) / payoff)
    };
    let kelly_half = kelly_full * 0.5;

    let mut metrics = RiskMetrics {
        expectancy,
        kelly_full,
        kelly_half,
        ..RiskMetrics::default()
    };

    let daily = daily_returns(trades);
    if daily.is_empty() {
        tracing::debug!(trades = trades.len(), "No dated trades, skipping time-series metrics");
        return metrics;
    }

    let daily_mean = mean(&daily);
    let std_dev = population_std_dev(&daily);
    let annualizer = TRADING_DAYS_PER_YEAR.sqrt();

    metrics.sharpe_ratio = finite_or_zero(safe_div(daily_mean, std_dev) * annualizer);
    metrics.sortino_ratio =
        finite_or_zero(safe_div(daily_mean, downside_deviation(&daily)) * annualizer);

    let curve = DrawdownCurve::from_trades(trades);
    metrics.max_drawdown = curve.max_drawdown;
    metrics.calmar_ratio = safe_div(curve.annualized_return(), curve.max_drawdown);

    metrics
}

/// Sum of P&L per calendar day of entry, in date order
fn daily_returns(trades: &[Trade]) -> Vec<f64> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for trade in trades {
        if let Some(day) = trade.entry_day() {
            *buckets.entry(day).or_insert(0.0) += to_f64(trade.pnl);
        }
    }
    buckets.into_values().collect()
}

/// Cumulative P&L walk over dated trades
struct DrawdownCurve {
    max_drawdown: f64,
    total_return: f64,
    span_days: f64,
}

impl DrawdownCurve {
    fn from_trades(trades: &[Trade]) -> Self {
        let mut dated: Vec<(chrono::DateTime<chrono::Utc>, f64)> = trades
            .iter()
            .filter_map(|t| t.entry_date.map(|at| (at, to_f64(t.pnl))))
            .collect();
        // Stable sort keeps input order for identical timestamps
        dated.sort_by_key(|(at, _)| *at);

        let mut cumulative = 0.0_f64;
        let mut peak = 0.0_f64;
        let mut max_drawdown = 0.0_f64;
        for (_, pnl) in &dated {
            cumulative += pnl;
            if cumulative > peak {
                peak = cumulative;
            }
            max_drawdown = max_drawdown.max(peak - cumulative);
        }

        let span_days = match (dated.first(), dated.last()) {
            (Some((first, _)), Some((last, _))) => {
                (*last - *first).num_milliseconds() as f64 / 86_400_000.0
            }
            _ => 0.0,
        };

        Self {
            max_drawdown: finite_or_zero(max_drawdown),
            total_return: finite_or_zero(cumulative),
            span_days,
        }
    }

    fn annualized_return(&self) -> f64 {
        let years = self.span_days / DAYS_PER_YEAR;
        safe_div(self.total_return, years)
    }
}
