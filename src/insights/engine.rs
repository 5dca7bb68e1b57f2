//! Behavior insights engine
//!
//! Scores stress and emotional risk from a trailing window of trades and
//! mood entries. Pure: the same inputs and window end always give the same
//! report.

use super::patterns::{is_high_volatility, is_impulsive};
use super::prompts::{build_recommendations, select_prompts};
use super::types::{Achievements, BehaviorInsights, InsightSummary, ModuleRates};
use crate::analytics::stats::{mean, percent_of, population_std_dev};
use crate::journal::{Mood, Trade};
use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Emotion values below this count as low mood
pub const LOW_MOOD_THRESHOLD: f64 = 35.0;

/// Floor for the adaptive overtrade threshold
pub const MIN_OVERTRADE_THRESHOLD: usize = 8;

/// Standard deviations above the mean daily count before a day is overtraded
pub const OVERTRADE_STD_MULTIPLIER: f64 = 1.5;

/// Size increase after a loss that counts as loss chasing
pub const LOSS_CHASE_SIZE_MULTIPLIER: Decimal = dec!(1.25);

/// Default analysis window
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

const STRESS_IMPULSIVE_WEIGHT: f64 = 0.42;
const STRESS_OVERTRADE_WEIGHT: f64 = 0.23;
const STRESS_LOSS_CHASING_WEIGHT: f64 = 0.20;
const STRESS_LOW_MOOD_WEIGHT: f64 = 0.15;

const EMOTIONAL_IMPULSIVE_WEIGHT: f64 = 0.6;
const EMOTIONAL_LOSS_CHASING_WEIGHT: f64 = 0.25;
const EMOTIONAL_OVERTRADE_WEIGHT: f64 = 0.15;

const STEADY_HAND_STREAK: usize = 30;
const CONTROL_STREAK: usize = 7;
const EMOTIONAL_MASTER_MAX_RISK: f64 = 10.0;

/// A window trade with its resolved timestamp and annotation flags
struct TaggedTrade<'a> {
    trade: &'a Trade,
    at: DateTime<Utc>,
    impulsive: bool,
    high_volatility: bool,
}

#[derive(Debug, Default)]
struct DayAggregate {
    trades: usize,
    impulsive: usize,
    net: Decimal,
}

/// Compute insights for the window ending now
pub fn compute_behavior_insights(
    trades: &[Trade],
    moods: &[Mood],
    period_days: u32,
) -> BehaviorInsights {
    compute_behavior_insights_at(trades, moods, period_days, Utc::now())
}

/// Compute insights for the window ending at `now`
pub fn compute_behavior_insights_at(
    trades: &[Trade],
    moods: &[Mood],
    period_days: u32,
    now: DateTime<Utc>,
) -> BehaviorInsights {
    let period_days = period_days.max(1);
    // Windows reaching past the representable range start at the earliest instant
    let window_start = now
        .checked_sub_signed(Duration::days(i64::from(period_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut window: Vec<TaggedTrade<'_>> = trades
        .iter()
        .filter_map(|trade| {
            let at = trade.trade_date()?;
            if at < window_start || at > now {
                return None;
            }
            let text = trade.annotation_text();
            Some(TaggedTrade {
                trade,
                at,
                impulsive: is_impulsive(&text),
                high_volatility: is_high_volatility(&text),
            })
        })
        .collect();
    window.sort_by_key(|t| t.at);

    let days = aggregate_days(&window);
    let overtrade_threshold = overtrade_threshold(&days);
    let overtrading_days = days
        .values()
        .filter(|d| d.trades > overtrade_threshold)
        .count();
    let loss_chasing_events = count_loss_chasing(&window);

    let moods = window_moods(moods, now.date_naive(), period_days);
    let low_mood_entries = moods
        .iter()
        .filter(|(_, emotion)| *emotion < LOW_MOOD_THRESHOLD)
        .count();

    let summary = InsightSummary {
        period_days,
        total_trades: window.len(),
        trading_days: days.len(),
        impulsive_trade_count: window.iter().filter(|t| t.impulsive).count(),
        high_volatility_trade_count: window.iter().filter(|t| t.high_volatility).count(),
        overtrading_days,
        overtrade_threshold,
        loss_chasing_events,
        mood_entries: moods.len(),
        low_mood_entries,
        average_mood: average_daily_mood(&moods),
        net_pnl: window
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.trade.net_pnl())),
    };

    let modules = score_modules(&summary, &days, overtrade_threshold);
    let achievements = Achievements {
        steady_hand: modules.discipline_streak_days >= STEADY_HAND_STREAK,
        emotional_master: modules.emotional_risk_percent <= EMOTIONAL_MASTER_MAX_RISK
            && summary.loss_chasing_events == 0,
        control_streak: modules.discipline_streak_days >= CONTROL_STREAK,
    };
    let prompts = select_prompts(&summary, &modules);
    let recommendations = build_recommendations(&summary, &modules);

    tracing::debug!(
        trades = summary.total_trades,
        trading_days = summary.trading_days,
        stress = modules.stress_score,
        emotional_risk = modules.emotional_risk_percent,
        "Computed behavior insights"
    );

    BehaviorInsights {
        summary,
        modules,
        achievements,
        prompts,
        recommendations,
    }
}

fn aggregate_days(window: &[TaggedTrade<'_>]) -> BTreeMap<NaiveDate, DayAggregate> {
    let mut days: BTreeMap<NaiveDate, DayAggregate> = BTreeMap::new();
    for tagged in window {
        let day = days.entry(tagged.at.date_naive()).or_default();
        day.trades += 1;
        day.net = day.net.saturating_add(tagged.trade.net_pnl());
        if tagged.impulsive {
            day.impulsive += 1;
        }
    }
    days
}

/// `max(8, ceil(mean + 1.5 * std))` of daily trade counts
fn overtrade_threshold(days: &BTreeMap<NaiveDate, DayAggregate>) -> usize {
    let counts: Vec<f64> = days.values().map(|d| d.trades as f64).collect();
    let adaptive = (mean(&counts) + OVERTRADE_STD_MULTIPLIER * population_std_dev(&counts)).ceil();
    (adaptive as usize).max(MIN_OVERTRADE_THRESHOLD)
}

/// Same-day size increases of at least 25% right after a losing trade
fn count_loss_chasing(window: &[TaggedTrade<'_>]) -> usize {
    window
        .windows(2)
        .filter(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            prev.at.date_naive() == curr.at.date_naive()
                && prev.trade.net_pnl() < Decimal::ZERO
                && prev.trade.quantity > Decimal::ZERO
                && prev
                    .trade
                    .quantity
                    .checked_mul(LOSS_CHASE_SIZE_MULTIPLIER)
                    .is_some_and(|needed| curr.trade.quantity >= needed)
        })
        .count()
}

/// Mood entries whose day falls inside the window, with clamped emotion
fn window_moods(moods: &[Mood], today: NaiveDate, period_days: u32) -> Vec<(NaiveDate, f64)> {
    let first_day = today
        .checked_sub_days(Days::new(u64::from(period_days)))
        .unwrap_or(NaiveDate::MIN);
    moods
        .iter()
        .filter_map(|m| m.day.map(|day| (day, m.emotion())))
        .filter(|(day, _)| *day >= first_day && *day <= today)
        .collect()
}

/// Mean of per-day averages, so duplicate entries for a day count once
fn average_daily_mood(moods: &[(NaiveDate, f64)]) -> f64 {
    let mut per_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for (day, emotion) in moods {
        per_day.entry(*day).or_default().push(*emotion);
    }
    let daily: Vec<f64> = per_day.values().map(|v| mean(v)).collect();
    mean(&daily)
}

fn score_modules(
    summary: &InsightSummary,
    days: &BTreeMap<NaiveDate, DayAggregate>,
    overtrade_threshold: usize,
) -> ModuleRates {
    let impulsive_rate = percent_of(summary.impulsive_trade_count, summary.total_trades);
    let overtrade_day_rate = percent_of(summary.overtrading_days, summary.trading_days);
    let loss_chasing_rate = percent_of(summary.loss_chasing_events, summary.total_trades);
    let low_mood_rate = percent_of(summary.low_mood_entries, summary.mood_entries);

    let stress_score = (impulsive_rate * STRESS_IMPULSIVE_WEIGHT
        + overtrade_day_rate * STRESS_OVERTRADE_WEIGHT
        + loss_chasing_rate * STRESS_LOSS_CHASING_WEIGHT
        + low_mood_rate * STRESS_LOW_MOOD_WEIGHT)
        .clamp(0.0, 100.0);

    let emotional_risk_percent = (impulsive_rate * EMOTIONAL_IMPULSIVE_WEIGHT
        + loss_chasing_rate * EMOTIONAL_LOSS_CHASING_WEIGHT
        + overtrade_day_rate * EMOTIONAL_OVERTRADE_WEIGHT)
        .clamp(0.0, 100.0);

    let discipline_streak_days = days
        .values()
        .rev()
        .take_while(|d| d.impulsive == 0 && d.trades < overtrade_threshold)
        .count();

    ModuleRates {
        impulsive_rate,
        overtrade_day_rate,
        loss_chasing_rate,
        low_mood_rate,
        stress_score,
        emotional_risk_percent,
        discipline_streak_days,
    }
}
