//! Composite trading score
//!
//! Three components: win rate (0-40), profit factor (0-40) and
//! experience (0-20), summed and rounded to an integer 0-100.

use serde::{Deserialize, Serialize};

/// Inputs for the trading score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInputs {
    /// Win rate as a percentage (0-100)
    pub win_rate: f64,
    /// Gross profit over gross loss
    pub profit_factor: f64,
    /// Number of trades taken
    pub total_trades: u64,
}

fn win_rate_points(win_rate: f64) -> f64 {
    if win_rate >= 70.0 {
        40.0
    } else if win_rate >= 50.0 {
        20.0 + (win_rate - 50.0)
    } else if win_rate >= 30.0 {
        win_rate - 30.0
    } else {
        0.0
    }
}

fn profit_factor_points(profit_factor: f64) -> f64 {
    if profit_factor >= 2.0 {
        40.0
    } else if profit_factor >= 1.0 {
        20.0 + (profit_factor - 1.0) * 20.0
    } else {
        (profit_factor * 20.0).max(0.0)
    }
}

fn experience_points(total_trades: u64) -> f64 {
    total_trades.min(20) as f64
}

/// Calculate the 0-100 trading score
pub fn calculate_trading_score(inputs: &ScoreInputs) -> u8 {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let sum = win_rate_points(finite(inputs.win_rate))
        + profit_factor_points(finite(inputs.profit_factor))
        + experience_points(inputs.total_trades);
    sum.round().clamp(0.0, 100.0) as u8
}

/// Label for a score band
pub fn score_label(score: u8) -> &'static str {
    match score {
        90.. => "Elite",
        80..=89 => "Pro",
        60..=79 => "Solid",
        40..=59 => "Developing",
        _ => "Novice",
    }
}

/// Display colour for a score band
pub fn score_color(score: u8) -> &'static str {
    match score {
        90.. => "#22c55e",
        80..=89 => "#3b82f6",
        60..=79 => "#eab308",
        40..=59 => "#f97316",
        _ => "#ef4444",
    }
}
