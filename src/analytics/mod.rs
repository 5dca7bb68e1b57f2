//! Analytics module
//!
//! Risk metrics and trade statistics derived from journal trades. Every
//! function here is pure and recomputes from scratch on each call.

mod advanced;
pub mod stats;
mod summary;

pub use advanced::{
    calculate_advanced_metrics, RiskMetrics, DAYS_PER_YEAR, TRADING_DAYS_PER_YEAR,
};
pub use summary::{analyze_trades, AnalyticsReport, TradeStats};
