//! journal-risk: Behavioral and risk analytics for a trading journal
//!
//! This library provides the core components for:
//! - Fixed-point P&L for single round trips
//! - Trade statistics and risk-adjusted metrics (Sharpe, Sortino, Calmar, Kelly)
//! - A composite 0-100 trading score
//! - Behavior insights: stress, overtrading, loss chasing, discipline streaks
//! - Widget action gating from published risk manifests
//! - Structured logging and evaluation metrics

pub mod analytics;
pub mod cli;
pub mod config;
pub mod insights;
pub mod journal;
pub mod pnl;
pub mod policy;
pub mod score;
pub mod telemetry;
