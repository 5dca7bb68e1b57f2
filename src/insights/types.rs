//! Behavior insight report types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Counters over the analysis window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    /// Window length in days
    pub period_days: u32,
    /// Trades inside the window
    pub total_trades: usize,
    /// Distinct calendar days with at least one trade
    pub trading_days: usize,
    /// Trades annotated with impulsive markers
    pub impulsive_trade_count: usize,
    /// Trades annotated with high-volatility markers
    pub high_volatility_trade_count: usize,
    /// Days whose trade count exceeded the overtrade threshold
    pub overtrading_days: usize,
    /// Adaptive daily trade-count threshold
    pub overtrade_threshold: usize,
    /// Size increases right after a same-day loss
    pub loss_chasing_events: usize,
    /// Mood entries inside the window
    pub mood_entries: usize,
    /// Mood entries below the low-mood threshold
    pub low_mood_entries: usize,
    /// Mean of per-day average emotion values
    pub average_mood: f64,
    /// Net P&L of window trades
    pub net_pnl: Decimal,
}

/// Per-factor rates and composite scores, all percentages 0-100
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRates {
    /// Impulsive trades over all trades
    pub impulsive_rate: f64,
    /// Overtrading days over trading days
    pub overtrade_day_rate: f64,
    /// Loss-chasing events over all trades
    pub loss_chasing_rate: f64,
    /// Low-mood entries over mood entries
    pub low_mood_rate: f64,
    /// Weighted stress composite
    pub stress_score: f64,
    /// Weighted emotional-risk composite
    pub emotional_risk_percent: f64,
    /// Consecutive disciplined trading days, most recent first
    pub discipline_streak_days: usize,
}

/// Achievement flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    /// Discipline streak of 30 days or more
    pub steady_hand: bool,
    /// Emotional risk at most 10% and no loss chasing
    pub emotional_master: bool,
    /// Discipline streak of 7 days or more
    pub control_streak: bool,
}

/// Coaching prompts selected from the scores
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompts {
    /// Mindfulness check-in
    pub mindful: String,
    /// Post-trade review question
    pub post_trade_review: String,
    /// Risk guard reminder
    pub risk_guard: String,
}

/// Full behavior insight report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorInsights {
    /// Window counters
    pub summary: InsightSummary,
    /// Factor rates and composites
    pub modules: ModuleRates,
    /// Achievement flags
    pub achievements: Achievements,
    /// Coaching prompts
    pub prompts: Prompts,
    /// Ordered recommendations
    pub recommendations: Vec<String>,
}

impl BehaviorInsights {
    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let mut out = format!(
            r#"
══════════════════════════════════════════════════════
            BEHAVIOR INSIGHTS ({} days)
══════════════════════════════════════════════════════

ACTIVITY
───────────────────────────────────────────────────────
Trades:           {} over {} days
Net P&L:          {:+.2}
Impulsive:        {}
High Volatility:  {}
Overtrade Limit:  {} trades/day ({} days over)
Loss Chasing:     {}
Average Mood:     {:.1} ({} entries, {} low)

SCORES
───────────────────────────────────────────────────────
Stress Score:     {:.1}
Emotional Risk:   {:.1}%
Discipline:       {} day streak

PROMPTS
───────────────────────────────────────────────────────
{}
{}
{}

RECOMMENDATIONS
───────────────────────────────────────────────────────
"#,
            self.summary.period_days,
            self.summary.total_trades,
            self.summary.trading_days,
            self.summary.net_pnl,
            self.summary.impulsive_trade_count,
            self.summary.high_volatility_trade_count,
            self.summary.overtrade_threshold,
            self.summary.overtrading_days,
            self.summary.loss_chasing_events,
            self.summary.average_mood,
            self.summary.mood_entries,
            self.summary.low_mood_entries,
            self.modules.stress_score,
            self.modules.emotional_risk_percent,
            self.modules.discipline_streak_days,
            self.prompts.mindful,
            self.prompts.post_trade_review,
            self.prompts.risk_guard,
        );
        for rec in &self.recommendations {
            out.push_str("- ");
            out.push_str(rec);
            out.push('\n');
        }
        out
    }
}
