//! Risk scoring
//!
//! Pure scoring of a validated manifest against an action and environment.

use super::manifest::{ActionPolicy, WidgetManifest};
use super::types::{Decision, ExecutionMode, RiskLevel};
use serde::Serialize;

/// Score at or above which an action is blocked
pub const RED_THRESHOLD: f64 = 70.0;

/// Score at or above which an action needs consent
pub const AMBER_THRESHOLD: f64 = 40.0;

/// Score at or above which the risk level is critical
pub const CRITICAL_LEVEL_THRESHOLD: f64 = 85.0;

/// Added to the score in live trading
pub const LIVE_ENVIRONMENT_ADJUSTMENT: f64 = 10.0;

const INHERENT_WEIGHT: f64 = 0.6;
const SEVERITY_WEIGHT: f64 = 0.4;
const MAX_CONTROL_EFFECTIVENESS: f64 = 5.0;
const MAX_CONTROL_REDUCTION: f64 = 0.5;

/// Intermediate values of one scoring pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Weight of the severity tier
    pub severity_weight: f64,
    /// Probability times impact
    pub inherent_risk: f64,
    /// `0.6 * inherent + 0.4 * severity`
    pub base_score: f64,
    /// Base score after control reduction, at most halved
    pub controlled_score: f64,
    /// Residual floor, 0 when the manifest sets none
    pub residual_floor: f64,
    /// Per-action adjustment from the manifest
    pub action_adjustment: f64,
    /// Added for live trading
    pub environment_adjustment: f64,
    /// Final score, clamped to 0-100
    pub risk_score: f64,
}

/// Score a manifest for an action
pub fn score_manifest(
    manifest: &WidgetManifest,
    action: Option<&ActionPolicy>,
    mode: ExecutionMode,
) -> ScoreBreakdown {
    let risk = &manifest.risk_assessment;
    let severity_weight = risk.severity_tier.weight();
    let inherent_risk = risk.probability_score * risk.impact_weight;
    let base_score = INHERENT_WEIGHT * inherent_risk + SEVERITY_WEIGHT * severity_weight;
    let controlled_score = base_score
        * (1.0 - risk.control_effectiveness / MAX_CONTROL_EFFECTIVENESS * MAX_CONTROL_REDUCTION);
    let residual_floor = risk.residual_risk_score.unwrap_or(0.0);
    let action_adjustment = action.map(|a| a.score_adjustment).unwrap_or(0.0);
    let environment_adjustment = match mode {
        ExecutionMode::Live => LIVE_ENVIRONMENT_ADJUSTMENT,
        ExecutionMode::Paper => 0.0,
    };

    let raw = controlled_score.max(residual_floor) + action_adjustment + environment_adjustment;
    let risk_score = if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        100.0
    };

    ScoreBreakdown {
        severity_weight,
        inherent_risk,
        base_score,
        controlled_score,
        residual_floor,
        action_adjustment,
        environment_adjustment,
        risk_score,
    }
}

/// Map a score to a decision, applying action overrides
pub fn decide(risk_score: f64, action: Option<&ActionPolicy>) -> Decision {
    let by_score = if risk_score >= RED_THRESHOLD {
        Decision::Red
    } else if risk_score >= AMBER_THRESHOLD {
        Decision::Amber
    } else {
        Decision::Green
    };

    match action {
        Some(policy) if policy.blocked => Decision::Red,
        Some(policy) if policy.requires_consent && by_score == Decision::Green => Decision::Amber,
        _ => by_score,
    }
}

/// Map a score to a risk level
pub fn risk_level(risk_score: f64) -> RiskLevel {
    if risk_score >= CRITICAL_LEVEL_THRESHOLD {
        RiskLevel::Critical
    } else if risk_score >= RED_THRESHOLD {
        RiskLevel::High
    } else if risk_score >= AMBER_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
