//! Integration tests for behavior insights

use super::analytics_test::{arb_trade, trade_epoch};
use chrono::{TimeZone, Utc};
use journal_risk::insights::{compute_behavior_insights_at, MIN_OVERTRADE_THRESHOLD};
use journal_risk::journal::{moods_from_json, trades_from_json, Mood};
use proptest::prelude::*;
use rust_decimal_macros::dec;

const TRADES: &str = r#"[
    {"instrument": "ES", "quantity": 1, "entryDate": "2024-03-29T10:00:00Z", "pnl": -100,
     "comment": "Chasing the open, FOMO"},
    {"instrument": "ES", "quantity": 2, "entryDate": "2024-03-29T10:30:00Z", "pnl": -40,
     "tags": ["revenge"]},
    {"instrument": "ES", "quantity": 2, "entryDate": "2024-03-29T11:00:00Z", "pnl": 200},
    {"instrument": "NQ", "quantity": 1, "entryDate": "2024-03-30T13:30:00Z", "pnl": "50",
     "comment": "CPI print"},
    {"instrument": "NQ", "quantity": 5, "entryDate": "2024-01-02T13:30:00Z", "pnl": 1000},
    {"instrument": "NQ", "quantity": 5, "pnl": 1000}
]"#;

const MOODS: &str = r#"[
    {"day": "2024-03-29", "emotionValue": 20},
    {"day": "2024-03-30", "emotionValue": 60},
    {"day": "2024-03-30T20:00:00Z", "emotionValue": "40"},
    {"day": "2023-12-01", "emotionValue": 10}
]"#;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 31, 23, 0, 0).unwrap()
}

#[test]
fn test_journal_insights() {
    let trades = trades_from_json(TRADES).unwrap();
    let moods = moods_from_json(MOODS).unwrap();
    let insights = compute_behavior_insights_at(&trades, &moods, 30, now());
    let summary = &insights.summary;

    // Old and undated trades fall outside the window
    assert_eq!(summary.total_trades, 4);
    assert_eq!(summary.trading_days, 2);
    assert_eq!(summary.net_pnl, dec!(110));
    assert_eq!(summary.impulsive_trade_count, 2);
    assert_eq!(summary.high_volatility_trade_count, 1);
    assert_eq!(summary.loss_chasing_events, 1);
    assert_eq!(summary.overtrade_threshold, MIN_OVERTRADE_THRESHOLD);
    assert_eq!(summary.overtrading_days, 0);

    assert_eq!(summary.mood_entries, 3);
    assert_eq!(summary.low_mood_entries, 1);
    // Per-day averages 20 and 50
    assert!((summary.average_mood - 35.0).abs() < 1e-9);

    let modules = &insights.modules;
    assert!((modules.impulsive_rate - 50.0).abs() < 1e-9);
    assert!((modules.loss_chasing_rate - 25.0).abs() < 1e-9);
    // 50*0.42 + 25*0.20 + 33.3*0.15
    assert!((modules.stress_score - 31.0).abs() < 1e-9);
    // 50*0.6 + 25*0.25
    assert!((modules.emotional_risk_percent - 36.25).abs() < 1e-9);
    assert_eq!(modules.discipline_streak_days, 1);

    assert!(!insights.achievements.emotional_master);
    assert!(!insights.achievements.control_streak);
    assert!(insights.prompts.mindful.starts_with("Stress is building"));
    assert!(insights.prompts.post_trade_review.starts_with("2 trade(s)"));

    assert_eq!(insights.recommendations.len(), 2);
    assert!(insights.recommendations[0].contains("loss-chasing"));
    assert!(insights.recommendations[1].contains("impulsive"));
}

#[test]
fn test_shorter_window() {
    let trades = trades_from_json(TRADES).unwrap();
    let insights = compute_behavior_insights_at(&trades, &[], 2, now());

    assert_eq!(insights.summary.total_trades, 1);
    assert_eq!(insights.summary.loss_chasing_events, 0);
    assert_eq!(insights.modules.discipline_streak_days, 1);
}

#[test]
fn test_insights_json_shape() {
    let trades = trades_from_json(TRADES).unwrap();
    let insights = compute_behavior_insights_at(&trades, &[], 30, now());
    let json = serde_json::to_value(&insights).unwrap();

    assert_eq!(json["summary"]["periodDays"], 30);
    assert!(json["modules"]["stressScore"].is_number());
    assert!(json["achievements"]["steadyHand"].is_boolean());
    assert!(json["prompts"]["riskGuard"].is_string());
    assert!(json["recommendations"].is_array());
}

#[test]
fn test_same_input_same_output() {
    let trades = trades_from_json(TRADES).unwrap();
    let moods = moods_from_json(MOODS).unwrap();
    let first = compute_behavior_insights_at(&trades, &moods, 30, now());
    let second = compute_behavior_insights_at(&trades, &moods, 30, now());
    assert_eq!(first, second);
}

fn arb_mood() -> impl Strategy<Value = Mood> {
    (
        prop::option::of(0i64..400),
        prop::option::of(prop::num::f64::ANY),
    )
        .prop_map(|(day, emotion_value)| Mood {
            day: day.map(|d| (trade_epoch() + chrono::Duration::days(d)).date_naive()),
            emotion_value,
            notes: None,
        })
}

proptest! {
    #[test]
    fn prop_insights_total_over_any_window(
        trades in prop::collection::vec(arb_trade(), 0..40),
        moods in prop::collection::vec(arb_mood(), 0..20),
        period_days in prop_oneof![Just(0u32), 1u32..500, Just(u32::MAX), any::<u32>()],
        now_offset in 0i64..500,
    ) {
        let now = trade_epoch() + chrono::Duration::days(now_offset);
        let insights = compute_behavior_insights_at(&trades, &moods, period_days, now);
        let modules = &insights.modules;

        for rate in [
            modules.impulsive_rate,
            modules.overtrade_day_rate,
            modules.loss_chasing_rate,
            modules.low_mood_rate,
            modules.stress_score,
            modules.emotional_risk_percent,
            insights.summary.average_mood,
        ] {
            prop_assert!(rate.is_finite());
            prop_assert!((0.0..=100.0).contains(&rate));
        }
        prop_assert!(insights.summary.total_trades <= trades.len());
        prop_assert!(insights.summary.period_days >= 1);
    }
}
