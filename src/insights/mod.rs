//! Behavior insights module
//!
//! Stress and emotional-risk scoring, overtrading and loss-chasing
//! detection, discipline streaks and coaching prompts.

mod engine;
mod patterns;
mod prompts;
mod types;

pub use engine::{
    compute_behavior_insights, compute_behavior_insights_at, DEFAULT_PERIOD_DAYS,
    LOSS_CHASE_SIZE_MULTIPLIER, LOW_MOOD_THRESHOLD, MIN_OVERTRADE_THRESHOLD,
    OVERTRADE_STD_MULTIPLIER,
};
pub use patterns::{is_high_volatility, is_impulsive, HIGH_VOLATILITY_PATTERN, IMPULSIVE_PATTERN};
pub use prompts::{HIGH_STRESS_SCORE, STABLE_RECOMMENDATION};
pub use types::{Achievements, BehaviorInsights, InsightSummary, ModuleRates, Prompts};
