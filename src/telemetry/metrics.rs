//! Evaluation metrics
//!
//! Recorded through the `metrics` facade. Without an installed recorder
//! every call is a no-op.

use crate::policy::{Decision, ManifestOrigin};
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Full policy evaluation, fetch included
    PolicyEvaluation,
    /// Manifest fetch only
    ManifestFetch,
}

impl LatencyMetric {
    fn name(&self) -> &'static str {
        match self {
            LatencyMetric::PolicyEvaluation => "journal_risk_policy_evaluation_seconds",
            LatencyMetric::ManifestFetch => "journal_risk_manifest_fetch_seconds",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    tracing::trace!(
        metric = metric.name(),
        value_ms = duration.as_millis() as u64,
        "Recording latency"
    );
    ::metrics::histogram!(metric.name()).record(duration.as_secs_f64());
}

/// Count a policy decision
pub fn record_decision(decision: Decision, origin: ManifestOrigin) {
    let origin = match origin {
        ManifestOrigin::Fetched => "fetched",
        ManifestOrigin::Fallback => "fallback",
    };
    ::metrics::counter!(
        "journal_risk_policy_decisions_total",
        "decision" => decision.as_str(),
        "manifest" => origin
    )
    .increment(1);
}

/// Count a manifest fallback
pub fn record_manifest_fallback(reason: &'static str) {
    ::metrics::counter!("journal_risk_manifest_fallbacks_total", "reason" => reason).increment(1);
}
