//! Policy evaluation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Gating outcome for a widget action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Proceed unconditionally
    Green,
    /// Proceed only after explicit user consent
    Amber,
    /// Blocked
    Red,
}

impl Decision {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Green => "green",
            Decision::Amber => "amber",
            Decision::Red => "red",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse risk band for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Where the manifest used for an evaluation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestOrigin {
    /// Loaded from the manifest source
    Fetched,
    /// Source failed or timed out; the conservative default was used
    Fallback,
}

/// Execution mode of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Paper,
    Live,
}

/// Environment descriptor supplied by the caller
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentContext {
    /// Paper or live trading
    #[serde(default)]
    pub mode: ExecutionMode,
    /// Any further descriptors, carried through untouched
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl EnvironmentContext {
    /// Live trading environment
    pub fn live() -> Self {
        Self {
            mode: ExecutionMode::Live,
            extra: BTreeMap::new(),
        }
    }
}

/// What is being evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEvaluationContext {
    /// Widget whose manifest governs the action
    pub widget_id: String,
    /// Action the user is attempting
    pub action: String,
    /// Caller-supplied action inputs
    #[serde(default)]
    pub inputs: BTreeMap<String, Value>,
    /// Environment descriptor
    #[serde(default)]
    pub environment_context: EnvironmentContext,
}

impl PolicyEvaluationContext {
    /// Create a context with no inputs in the default environment
    pub fn new(widget_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            action: action.into(),
            inputs: BTreeMap::new(),
            environment_context: EnvironmentContext::default(),
        }
    }

    /// Set the environment
    pub fn with_environment(mut self, environment: EnvironmentContext) -> Self {
        self.environment_context = environment;
        self
    }

    /// Add an input value
    pub fn with_input(mut self, key: impl Into<String>, value: Value) -> Self {
        self.inputs.insert(key.into(), value);
        self
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEvaluationResult {
    /// Unique id for audit logs
    pub evaluation_id: Uuid,
    /// Evaluated widget
    pub widget_id: String,
    /// Evaluated action
    pub action: String,
    /// Gating decision
    pub decision: Decision,
    /// Risk score 0-100
    pub risk_score: f64,
    /// Risk band
    pub risk_level: RiskLevel,
    /// How the score was reached
    pub justification: String,
    /// Suggested mitigations
    pub mitigations: Vec<String>,
    /// Manifest provenance
    pub manifest_source: ManifestOrigin,
    /// Evaluation time
    pub evaluated_at: DateTime<Utc>,
}

impl RiskEvaluationResult {
    /// Action must not proceed
    pub fn is_blocked(&self) -> bool {
        self.decision == Decision::Red
    }

    /// Action needs explicit consent from the user
    pub fn requires_consent(&self) -> bool {
        self.decision == Decision::Amber
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let mut out = format!(
            r#"
══════════════════════════════════════════════════════
               POLICY EVALUATION
══════════════════════════════════════════════════════
Widget:           {}
Action:           {}
Decision:         {}
Risk Score:       {:.1} ({})
Manifest:         {:?}
Evaluation ID:    {}

{}
"#,
            self.widget_id,
            self.action,
            self.decision.as_str().to_uppercase(),
            self.risk_score,
            self.risk_level,
            self.manifest_source,
            self.evaluation_id,
            self.justification,
        );
        for mitigation in &self.mitigations {
            out.push_str("- ");
            out.push_str(mitigation);
            out.push('\n');
        }
        out
    }
}

/// Evaluation failed
///
/// Distinct from a red decision: the engine could not decide at all.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Context is missing required fields
    #[error("Invalid evaluation context: {0}")]
    InvalidContext(String),
    /// Manifest values are out of range or malformed
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
    /// Manifest schema major version is not supported
    #[error("Unsupported manifest schema version: {0}")]
    UnsupportedSchema(String),
}
