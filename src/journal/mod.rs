//! Journal records module
//!
//! Normalized trade and mood records produced by the import and
//! persistence layers. The analytics engines only read these.

mod mood;
mod parse;
mod trade;

pub use mood::{Mood, DEFAULT_EMOTION_VALUE};
pub use parse::{parse_day, parse_decimal, parse_timestamp};
pub use trade::{Side, Trade};

/// Load trades from a JSON array
pub fn trades_from_json(json: &str) -> serde_json::Result<Vec<Trade>> {
    serde_json::from_str(json)
}

/// Load mood entries from a JSON array
pub fn moods_from_json(json: &str) -> serde_json::Result<Vec<Mood>> {
    serde_json::from_str(json)
}
