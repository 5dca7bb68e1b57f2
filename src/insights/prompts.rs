//! Prompt and recommendation templates

use super::types::{InsightSummary, ModuleRates, Prompts};

/// Stress score at or above which the report treats stress as high
pub const HIGH_STRESS_SCORE: f64 = 60.0;

const MODERATE_STRESS_SCORE: f64 = 30.0;
const ELEVATED_EMOTIONAL_RISK: f64 = 40.0;

/// Fallback recommendation when no condition triggers
pub const STABLE_RECOMMENDATION: &str =
    "Behavior looks stable. Keep following your plan and journaling every trade.";

/// Select the three coaching prompts
pub fn select_prompts(summary: &InsightSummary, rates: &ModuleRates) -> Prompts {
    let mindful = if rates.stress_score >= HIGH_STRESS_SCORE {
        format!(
            "Stress is high ({:.0}/100). Step away for five minutes and breathe before the next entry.",
            rates.stress_score
        )
    } else if rates.stress_score >= MODERATE_STRESS_SCORE {
        format!(
            "Stress is building ({:.0}/100). Check in with how you feel before placing the next order.",
            rates.stress_score
        )
    } else {
        "You are trading from a calm state. Note what is keeping you grounded today.".to_string()
    };

    let post_trade_review = if summary.impulsive_trade_count > 0 {
        format!(
            "{} trade(s) were tagged as impulsive. What triggered them, and what would have stopped you?",
            summary.impulsive_trade_count
        )
    } else {
        "Review your last trade: did the entry, size and exit match your plan?".to_string()
    };

    let risk_guard =
        if rates.emotional_risk_percent >= ELEVATED_EMOTIONAL_RISK || summary.overtrading_days > 0 {
            format!(
                "Emotional risk is {:.0}%. Cap today at {} trades and cut size after any loss.",
                rates.emotional_risk_percent, summary.overtrade_threshold
            )
        } else {
            "Risk is contained. Keep position size and daily loss limits unchanged.".to_string()
        };

    Prompts {
        mindful,
        post_trade_review,
        risk_guard,
    }
}

/// Build recommendations in a fixed order
pub fn build_recommendations(summary: &InsightSummary, rates: &ModuleRates) -> Vec<String> {
    let mut recommendations = Vec::new();

    if summary.overtrading_days > 0 {
        recommendations.push(format!(
            "You exceeded {} trades on {} day(s). Set a hard daily trade limit.",
            summary.overtrade_threshold, summary.overtrading_days
        ));
    }
    if summary.loss_chasing_events > 0 {
        recommendations.push(format!(
            "Detected {} loss-chasing event(s). Keep size flat or smaller after a losing trade.",
            summary.loss_chasing_events
        ));
    }
    if summary.impulsive_trade_count > 0 {
        recommendations.push(format!(
            "{} impulsive trade(s) logged. Wait for a full setup checklist before entering.",
            summary.impulsive_trade_count
        ));
    }
    if rates.stress_score >= HIGH_STRESS_SCORE {
        recommendations.push(
            "Stress score is elevated. Reduce size and consider a cool-down day.".to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push(STABLE_RECOMMENDATION.to_string());
    }
    recommendations
}
