//! Widget risk policy engine
//!
//! Loads the manifest for a widget, scores the requested action and maps the
//! score to a green/amber/red decision. The engine keeps no consent state:
//! an amber decision tells the caller to obtain consent itself.

use super::manifest::{ManifestDocument, SeverityTier, WidgetManifest};
use super::scoring::{decide, risk_level, score_manifest, ScoreBreakdown};
use super::source::ManifestSource;
use super::types::{
    Decision, ManifestOrigin, PolicyError, PolicyEvaluationContext, RiskEvaluationResult,
};
use crate::telemetry::{record_decision, record_latency, record_manifest_fallback, LatencyMetric};
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// Default bound on a manifest fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

const BLOCKED_MITIGATION: &str =
    "Action blocked. Reduce exposure or strengthen controls before retrying.";
const CONSENT_MITIGATION: &str = "Obtain explicit user consent before proceeding.";
const HIGH_SEVERITY_MITIGATION: &str =
    "High-severity widget: review position limits before acting.";
const CRITICAL_SEVERITY_MITIGATION: &str =
    "Critical-severity widget: confirm a hard daily loss limit is active before acting.";
const FALLBACK_MITIGATION: &str =
    "No risk manifest could be loaded for this widget; conservative defaults were applied.";

/// Policy engine over a manifest source
pub struct PolicyEngine<S: ManifestSource> {
    source: S,
    fetch_timeout: Duration,
}

impl<S: ManifestSource> PolicyEngine<S> {
    /// Create an engine with the default fetch timeout
    pub fn new(source: S) -> Self {
        Self {
            source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the fetch timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Configured fetch timeout
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Evaluate an action
    ///
    /// Fetch failures and timeouts fall back to the default manifest, the only
    /// path that carries its residual floor of 50. Invalid contexts and invalid
    /// manifests return an error instead of a decision.
    pub async fn evaluate(
        &self,
        context: &PolicyEvaluationContext,
    ) -> Result<RiskEvaluationResult, PolicyError> {
        let started = Instant::now();
        validate_context(context)?;

        let (manifest, origin) = match self.load_manifest(&context.widget_id).await {
            Some(document) => (document.resolve()?, ManifestOrigin::Fetched),
            None => (WidgetManifest::default(), ManifestOrigin::Fallback),
        };
        let result = evaluate_manifest(context, &manifest, origin);

        record_decision(result.decision, origin);
        record_latency(LatencyMetric::PolicyEvaluation, started.elapsed());
        debug!(
            widget_id = %result.widget_id,
            action = %result.action,
            decision = %result.decision,
            risk_score = result.risk_score,
            inputs = context.inputs.len(),
            "Policy evaluated"
        );

        Ok(result)
    }

    async fn load_manifest(&self, widget_id: &str) -> Option<ManifestDocument> {
        let started = Instant::now();
        let fetched = tokio::time::timeout(self.fetch_timeout, self.source.fetch(widget_id)).await;
        record_latency(LatencyMetric::ManifestFetch, started.elapsed());

        match fetched {
            Ok(Ok(document)) => Some(document),
            Ok(Err(e)) => {
                warn!(widget_id, error = %e, "Manifest fetch failed, using default manifest");
                record_manifest_fallback("error");
                None
            }
            Err(_) => {
                warn!(
                    widget_id,
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "Manifest fetch timed out, using default manifest"
                );
                record_manifest_fallback("timeout");
                None
            }
        }
    }
}

/// Score a resolved manifest for a context
///
/// Mitigations list the manifest's own entries, then severity guidance for
/// High and Critical widgets, then the decision's requirement, then a note
/// when the default manifest stood in.
pub fn evaluate_manifest(
    context: &PolicyEvaluationContext,
    manifest: &WidgetManifest,
    origin: ManifestOrigin,
) -> RiskEvaluationResult {
    let action_policy = manifest.action_policy(&context.action);
    let breakdown = score_manifest(manifest, action_policy, context.environment_context.mode);
    let decision = decide(breakdown.risk_score, action_policy);

    let mut mitigations = manifest.mitigations.clone();
    match manifest.risk_assessment.severity_tier {
        SeverityTier::Critical => mitigations.push(CRITICAL_SEVERITY_MITIGATION.to_string()),
        SeverityTier::High => mitigations.push(HIGH_SEVERITY_MITIGATION.to_string()),
        SeverityTier::Medium | SeverityTier::Low => {}
    }
    match decision {
        Decision::Red => mitigations.push(BLOCKED_MITIGATION.to_string()),
        Decision::Amber => mitigations.push(CONSENT_MITIGATION.to_string()),
        Decision::Green => {}
    }
    if origin == ManifestOrigin::Fallback {
        mitigations.push(FALLBACK_MITIGATION.to_string());
    }

    RiskEvaluationResult {
        evaluation_id: Uuid::new_v4(),
        widget_id: context.widget_id.clone(),
        action: context.action.clone(),
        decision,
        risk_score: breakdown.risk_score,
        risk_level: risk_level(breakdown.risk_score),
        justification: justify(manifest, &breakdown, decision, action_policy.is_some()),
        mitigations,
        manifest_source: origin,
        evaluated_at: Utc::now(),
    }
}

fn validate_context(context: &PolicyEvaluationContext) -> Result<(), PolicyError> {
    if context.widget_id.trim().is_empty() {
        return Err(PolicyError::InvalidContext("widget id is empty".to_string()));
    }
    if context.action.trim().is_empty() {
        return Err(PolicyError::InvalidContext("action is empty".to_string()));
    }
    Ok(())
}

fn justify(
    manifest: &WidgetManifest,
    breakdown: &ScoreBreakdown,
    decision: Decision,
    has_action_policy: bool,
) -> String {
    let risk = &manifest.risk_assessment;
    let mut text = format!(
        "{} severity (weight {:.0}); probability {:.2} x impact {:.0} = inherent {:.1}; \
         controls {:.1}/5 reduce {:.1} to {:.1}; residual floor {:.1}",
        risk.severity_tier,
        breakdown.severity_weight,
        risk.probability_score,
        risk.impact_weight,
        breakdown.inherent_risk,
        risk.control_effectiveness,
        breakdown.base_score,
        breakdown.controlled_score,
        breakdown.residual_floor,
    );
    if breakdown.action_adjustment != 0.0 {
        text.push_str(&format!("; action {:+.1}", breakdown.action_adjustment));
    }
    if breakdown.environment_adjustment != 0.0 {
        text.push_str(&format!("; live trading {:+.1}", breakdown.environment_adjustment));
    }
    text.push_str(&format!(
        "; score {:.1} => {}",
        breakdown.risk_score,
        decision.as_str().to_uppercase()
    ));
    if has_action_policy {
        text.push_str(" (action policy applied)");
    }
    text
}
