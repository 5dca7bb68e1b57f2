//! Mood journal entries

use super::parse::{lenient_day, lenient_f64};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Emotion value assumed when an entry does not record one
pub const DEFAULT_EMOTION_VALUE: f64 = 50.0;

/// A per-day mood record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mood {
    /// Calendar day the entry belongs to
    #[serde(default, deserialize_with = "lenient_day")]
    pub day: Option<NaiveDate>,
    /// Emotion on a 0-100 scale
    #[serde(default, deserialize_with = "lenient_f64")]
    pub emotion_value: Option<f64>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl Mood {
    /// Create an entry for a day
    pub fn new(day: NaiveDate, emotion_value: f64) -> Self {
        Self {
            day: Some(day),
            emotion_value: Some(emotion_value),
            notes: None,
        }
    }

    /// Emotion value clamped to 0-100, defaulting to 50
    pub fn emotion(&self) -> f64 {
        self.emotion_value
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 100.0))
            .unwrap_or(DEFAULT_EMOTION_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_default_emotion() {
        let mood: Mood = serde_json::from_str(r#"{"day": "2024-04-01"}"#).unwrap();
        assert_eq!(mood.day, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(mood.emotion(), 50.0);
    }

    #[test]
    fn test_mood_clamped() {
        let day = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(Mood::new(day, 140.0).emotion(), 100.0);
        assert_eq!(Mood::new(day, -5.0).emotion(), 0.0);
        assert_eq!(Mood::new(day, f64::NAN).emotion(), 50.0);
    }

    #[test]
    fn test_mood_unparseable_day() {
        let mood: Mood =
            serde_json::from_str(r#"{"day": "someday", "emotionValue": "20", "notes": "tired"}"#)
                .unwrap();
        assert!(mood.day.is_none());
        assert_eq!(mood.emotion(), 20.0);
        assert_eq!(mood.notes.as_deref(), Some("tired"));
    }
}
