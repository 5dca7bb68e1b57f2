//! Trade records

use super::parse::{decimal_or_zero, lenient_decimal, lenient_tags, lenient_timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Profit when price rises
    Long,
    /// Profit when price falls
    Short,
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(Side::Long),
            "short" | "sell" => Ok(Side::Short),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

fn lenient_side<'de, D>(deserializer: D) -> Result<Option<Side>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok()))
}

/// A closed trade as normalized by the import layer
///
/// Read-only to the analytics core: `pnl` is taken as supplied and never
/// recomputed from prices. Every field is optional on input; a missing or
/// unparseable `pnl` reads as 0, which counts as a non-win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Instrument symbol
    #[serde(default)]
    pub instrument: String,
    /// Trade direction
    #[serde(default, deserialize_with = "lenient_side")]
    pub side: Option<Side>,
    /// Position size
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub quantity: Decimal,
    /// Average entry price
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub entry_price: Option<Decimal>,
    /// Average close price
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub close_price: Option<Decimal>,
    /// Entry timestamp
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub entry_date: Option<DateTime<Utc>>,
    /// Close timestamp
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub close_date: Option<DateTime<Utc>>,
    /// Realized profit or loss, 0 when missing
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub pnl: Decimal,
    /// Commission charged
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub commission: Decimal,
    /// Free-text journal comment
    #[serde(default)]
    pub comment: Option<String>,
    /// User tags
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

impl Trade {
    /// Create a trade with the given realized P&L and nothing else set
    pub fn new(pnl: Decimal) -> Self {
        Self {
            pnl,
            ..Self::default()
        }
    }

    /// Set the instrument
    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = instrument.into();
        self
    }

    /// Set side
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Set quantity
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set entry and close prices
    pub fn with_prices(mut self, entry: Decimal, close: Decimal) -> Self {
        self.entry_price = Some(entry);
        self.close_price = Some(close);
        self
    }

    /// Set entry timestamp
    pub fn with_entry_date(mut self, at: DateTime<Utc>) -> Self {
        self.entry_date = Some(at);
        self
    }

    /// Set close timestamp
    pub fn with_close_date(mut self, at: DateTime<Utc>) -> Self {
        self.close_date = Some(at);
        self
    }

    /// Set commission
    pub fn with_commission(mut self, commission: Decimal) -> Self {
        self.commission = commission;
        self
    }

    /// Set comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// P&L after commission, saturating at the decimal bounds
    pub fn net_pnl(&self) -> Decimal {
        self.pnl.saturating_sub(self.commission)
    }

    /// Whether the trade made money (`pnl > 0`)
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    /// Date used for behavioral windows: entry date, else close date
    pub fn trade_date(&self) -> Option<DateTime<Utc>> {
        self.entry_date.or(self.close_date)
    }

    /// UTC calendar day of the entry
    pub fn entry_day(&self) -> Option<NaiveDate> {
        self.entry_date.map(|dt| dt.date_naive())
    }

    /// Comment and tags joined for text pattern matching
    pub fn annotation_text(&self) -> String {
        let mut text = self.comment.clone().unwrap_or_default();
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text
    }
}
