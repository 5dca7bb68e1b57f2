//! Widget risk manifests
//!
//! A manifest arrives as a [`ManifestDocument`] in which every field is
//! optional. [`ManifestDocument::resolve`] merges it field by field against the
//! conservative default and validates the result into a [`WidgetManifest`].
//! The residual risk floor is the exception: an omitted floor stays absent, so
//! only the default manifest itself carries the floor of 50.

use super::types::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Schema major version this engine understands
pub const SUPPORTED_SCHEMA_MAJOR: u64 = 1;

/// Schema version assumed when a manifest omits it
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0";

/// Largest magnitude accepted for a per-action score adjustment
pub const MAX_SCORE_ADJUSTMENT: f64 = 100.0;

/// Severity tier of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityTier {
    /// Contribution of the tier to the base score
    pub fn weight(&self) -> f64 {
        match self {
            SeverityTier::Low => 25.0,
            SeverityTier::Medium => 50.0,
            SeverityTier::High => 75.0,
            SeverityTier::Critical => 100.0,
        }
    }
}

impl FromStr for SeverityTier {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SeverityTier::Low),
            "medium" => Ok(SeverityTier::Medium),
            "high" => Ok(SeverityTier::High),
            "critical" => Ok(SeverityTier::Critical),
            other => Err(PolicyError::InvalidManifest(format!(
                "unknown severity tier '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeverityTier::Low => "Low",
            SeverityTier::Medium => "Medium",
            SeverityTier::High => "High",
            SeverityTier::Critical => "Critical",
        };
        f.write_str(name)
    }
}

/// Per-action overrides declared by a manifest
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionPolicy {
    /// Always red
    pub blocked: bool,
    /// Never better than amber
    pub requires_consent: bool,
    /// Added to the score before clamping
    pub score_adjustment: f64,
}

/// Risk assessment as published, every field optional
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskAssessmentDocument {
    /// Tier name, matched case-insensitively
    pub severity_tier: Option<String>,
    /// Likelihood, must lie in 0-1
    pub probability_score: Option<f64>,
    /// Impact weight, must lie in 0-100
    pub impact_weight: Option<f64>,
    /// Control effectiveness, must lie in 0-5
    pub control_effectiveness: Option<f64>,
    /// Residual risk floor, must lie in 0-100; no floor when omitted
    pub residual_risk_score: Option<f64>,
}

/// Manifest as published by a widget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestDocument {
    /// `major.minor`; the major version must be supported
    pub schema_version: Option<String>,
    /// Widget the manifest describes
    pub widget_id: Option<String>,
    /// Risk assessment fields
    pub risk_assessment: Option<RiskAssessmentDocument>,
    /// Overrides keyed by action name
    pub actions: BTreeMap<String, ActionPolicy>,
    /// Mitigations listed ahead of the engine's own
    pub mitigations: Vec<String>,
}

/// Validated risk assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Severity tier
    pub severity_tier: SeverityTier,
    /// Likelihood, 0-1
    pub probability_score: f64,
    /// Impact weight, 0-100
    pub impact_weight: f64,
    /// Control effectiveness, 0-5
    pub control_effectiveness: f64,
    /// Residual risk floor, 0-100
    pub residual_risk_score: Option<f64>,
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            severity_tier: SeverityTier::Medium,
            probability_score: 0.5,
            impact_weight: 60.0,
            control_effectiveness: 1.0,
            residual_risk_score: Some(50.0),
        }
    }
}

/// Validated manifest used for scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetManifest {
    /// Validated schema version
    pub schema_version: String,
    /// Widget the manifest describes
    pub widget_id: Option<String>,
    /// Validated risk assessment
    pub risk_assessment: RiskAssessment,
    /// Overrides keyed by action name
    pub actions: BTreeMap<String, ActionPolicy>,
    /// Mitigations listed ahead of the engine's own
    pub mitigations: Vec<String>,
}

impl Default for WidgetManifest {
    /// Conservative manifest used when none can be fetched
    fn default() -> Self {
        Self {
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            widget_id: None,
            risk_assessment: RiskAssessment::default(),
            actions: BTreeMap::new(),
            mitigations: Vec::new(),
        }
    }
}

impl WidgetManifest {
    /// Overrides for an action, if the manifest declares any
    pub fn action_policy(&self, action: &str) -> Option<&ActionPolicy> {
        self.actions.get(action)
    }
}

impl ManifestDocument {
    /// Parse a manifest from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Merge against the default manifest and validate
    ///
    /// An omitted `residualRiskScore` resolves to no floor rather than the
    /// default's 50.
    pub fn resolve(self) -> Result<WidgetManifest, PolicyError> {
        let defaults = WidgetManifest::default();

        let schema_version = self
            .schema_version
            .unwrap_or_else(|| defaults.schema_version.clone());
        check_schema_version(&schema_version)?;

        let doc = self.risk_assessment.unwrap_or_default();
        let base = defaults.risk_assessment;
        let severity_tier = match doc.severity_tier {
            Some(tier) => tier.parse()?,
            None => base.severity_tier,
        };
        let risk_assessment = RiskAssessment {
            severity_tier,
            probability_score: in_range(
                "probabilityScore",
                doc.probability_score.unwrap_or(base.probability_score),
                0.0,
                1.0,
            )?,
            impact_weight: in_range(
                "impactWeight",
                doc.impact_weight.unwrap_or(base.impact_weight),
                0.0,
                100.0,
            )?,
            control_effectiveness: in_range(
                "controlEffectiveness",
                doc.control_effectiveness
                    .unwrap_or(base.control_effectiveness),
                0.0,
                5.0,
            )?,
            residual_risk_score: match doc.residual_risk_score {
                Some(residual) => Some(in_range("residualRiskScore", residual, 0.0, 100.0)?),
                None => None,
            },
        };

        for (action, policy) in &self.actions {
            in_range(
                &format!("actions.{}.scoreAdjustment", action),
                policy.score_adjustment,
                -MAX_SCORE_ADJUSTMENT,
                MAX_SCORE_ADJUSTMENT,
            )?;
        }

        Ok(WidgetManifest {
            schema_version,
            widget_id: self.widget_id,
            risk_assessment,
            actions: self.actions,
            mitigations: self.mitigations,
        })
    }
}

fn check_schema_version(version: &str) -> Result<(), PolicyError> {
    let major = version
        .trim()
        .split('.')
        .next()
        .and_then(|m| m.parse::<u64>().ok())
        .ok_or_else(|| PolicyError::UnsupportedSchema(version.to_string()))?;
    if major != SUPPORTED_SCHEMA_MAJOR {
        return Err(PolicyError::UnsupportedSchema(version.to_string()));
    }
    Ok(())
}

fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64, PolicyError> {
    if !value.is_finite() || value < min || value > max {
        return Err(PolicyError::InvalidManifest(format!(
            "{} must be within [{}, {}], got {}",
            field, min, max, value
        )));
    }
    Ok(value)
}
