//! Annotation pattern matching
//!
//! Keyword families are matched case-insensitively as substrings of a
//! trade's comment and tags.

use regex::Regex;
use std::sync::OnceLock;

/// Markers of impulsive or emotional trading
pub const IMPULSIVE_PATTERN: &str = r"(?i)revenge|fomo|panic|impulse|emotional|tilt|chase|overtrade";

/// Markers of trading into high-volatility events
pub const HIGH_VOLATILITY_PATTERN: &str = r"(?i)volatil|news|nfp|fomc|cpi";

fn impulsive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IMPULSIVE_PATTERN).expect("impulsive pattern is valid"))
}

fn high_volatility_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HIGH_VOLATILITY_PATTERN).expect("volatility pattern is valid"))
}

/// Whether the text carries an impulsive-trading marker
pub fn is_impulsive(text: &str) -> bool {
    impulsive_regex().is_match(text)
}

/// Whether the text carries a high-volatility marker
pub fn is_high_volatility(text: &str) -> bool {
    high_volatility_regex().is_match(text)
}
