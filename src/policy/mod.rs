//! Widget risk policy module
//!
//! Gates widget actions green, amber or red from the widget's published
//! risk manifest, falling back to a conservative default when the manifest
//! cannot be loaded in time.

mod engine;
mod manifest;
mod scoring;
mod source;
mod types;

pub use engine::{evaluate_manifest, PolicyEngine, DEFAULT_FETCH_TIMEOUT};
pub use manifest::{
    ActionPolicy, ManifestDocument, RiskAssessment, RiskAssessmentDocument, SeverityTier,
    WidgetManifest, DEFAULT_SCHEMA_VERSION, SUPPORTED_SCHEMA_MAJOR,
};
pub use scoring::{
    decide, risk_level, score_manifest, ScoreBreakdown, AMBER_THRESHOLD, CRITICAL_LEVEL_THRESHOLD,
    LIVE_ENVIRONMENT_ADJUSTMENT, RED_THRESHOLD,
};
pub use source::{
    HttpManifestConfig, HttpManifestSource, ManifestFetchError, ManifestSource,
    StaticManifestSource, DEFAULT_HTTP_TIMEOUT,
};
pub use types::{
    Decision, EnvironmentContext, ExecutionMode, ManifestOrigin, PolicyError,
    PolicyEvaluationContext, RiskEvaluationResult, RiskLevel,
};
