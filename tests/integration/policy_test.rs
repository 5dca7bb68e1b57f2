//! Integration tests for the widget risk policy engine

use journal_risk::policy::{
    Decision, EnvironmentContext, HttpManifestConfig, HttpManifestSource, ManifestDocument,
    ManifestFetchError, ManifestOrigin, ManifestSource, PolicyEngine, PolicyError,
    PolicyEvaluationContext, RiskLevel, StaticManifestSource,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_manifest(server: &MockServer, widget: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/widgets/{}/manifest", widget)))
        .respond_with(response)
        .mount(server)
        .await;
}

fn http_engine(server: &MockServer) -> PolicyEngine<HttpManifestSource> {
    let source = HttpManifestSource::new(HttpManifestConfig::new(server.uri())).unwrap();
    PolicyEngine::new(source).with_fetch_timeout(Duration::from_millis(500))
}

#[tokio::test]
async fn test_fetched_critical_manifest_is_red() {
    let server = MockServer::start().await;
    serve_manifest(
        &server,
        "auto-trader",
        ResponseTemplate::new(200).set_body_json(json!({
            "schemaVersion": "1.0",
            "widgetId": "auto-trader",
            "riskAssessment": {
                "severityTier": "Critical",
                "probabilityScore": 0.9,
                "impactWeight": 90,
                "controlEffectiveness": 1
            },
            "mitigations": ["Require a stop loss on every order"]
        })),
    )
    .await;

    let result = http_engine(&server)
        .evaluate(&PolicyEvaluationContext::new("auto-trader", "place_order"))
        .await
        .unwrap();

    assert_eq!(result.manifest_source, ManifestOrigin::Fetched);
    assert_eq!(result.decision, Decision::Red);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!((result.risk_score - 79.74).abs() < 1e-9);
    assert_eq!(result.mitigations.len(), 3);
    assert_eq!(result.mitigations[0], "Require a stop loss on every order");
    assert!(result.mitigations[1].starts_with("Critical-severity"));
    assert!(result.mitigations[2].starts_with("Action blocked"));
}

#[tokio::test]
async fn test_fetched_minimal_manifest_is_green() {
    let server = MockServer::start().await;
    serve_manifest(
        &server,
        "notes",
        ResponseTemplate::new(200).set_body_json(json!({
            "riskAssessment": {
                "severityTier": "Low",
                "probabilityScore": 0.05,
                "impactWeight": 5,
                "controlEffectiveness": 5,
                "residualRiskScore": 0
            }
        })),
    )
    .await;

    let result = http_engine(&server)
        .evaluate(&PolicyEvaluationContext::new("notes", "view"))
        .await
        .unwrap();

    assert_eq!(result.decision, Decision::Green);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn test_fetched_manifest_without_residual_has_no_floor() {
    let server = MockServer::start().await;
    serve_manifest(
        &server,
        "journal-notes",
        ResponseTemplate::new(200).set_body_json(json!({
            "riskAssessment": {
                "severityTier": "Low",
                "probabilityScore": 0.05,
                "impactWeight": 5,
                "controlEffectiveness": 5
            }
        })),
    )
    .await;

    let result = http_engine(&server)
        .evaluate(&PolicyEvaluationContext::new("journal-notes", "view"))
        .await
        .unwrap();

    assert_eq!(result.manifest_source, ManifestOrigin::Fetched);
    assert!(result.risk_score < 10.0);
    assert_eq!(result.decision, Decision::Green);
    assert!(result.mitigations.is_empty());
}

#[tokio::test]
async fn test_server_errors_fall_back_to_amber() {
    let server = MockServer::start().await;
    serve_manifest(&server, "broken", ResponseTemplate::new(500)).await;
    serve_manifest(
        &server,
        "garbled",
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
    )
    .await;
    let engine = http_engine(&server);

    // "missing" has no mock and gets a 404
    for widget in ["broken", "garbled", "missing"] {
        let result = engine
            .evaluate(&PolicyEvaluationContext::new(widget, "place_order"))
            .await
            .unwrap();
        assert_eq!(result.manifest_source, ManifestOrigin::Fallback, "{}", widget);
        assert_eq!(result.risk_score, 50.0);
        assert_eq!(result.decision, Decision::Amber);
    }
}

#[tokio::test]
async fn test_slow_manifest_times_out() {
    let server = MockServer::start().await;
    serve_manifest(
        &server,
        "slow",
        ResponseTemplate::new(200)
            .set_body_json(json!({"riskAssessment": {"severityTier": "Low"}}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let source = HttpManifestSource::new(HttpManifestConfig::new(server.uri())).unwrap();
    let engine = PolicyEngine::new(source).with_fetch_timeout(Duration::from_millis(100));
    let result = engine
        .evaluate(&PolicyEvaluationContext::new("slow", "place_order"))
        .await
        .unwrap();

    assert_eq!(result.manifest_source, ManifestOrigin::Fallback);
    assert_eq!(result.decision, Decision::Amber);
}

#[tokio::test]
async fn test_invalid_fetched_manifest_is_error() {
    let server = MockServer::start().await;
    serve_manifest(
        &server,
        "future",
        ResponseTemplate::new(200).set_body_json(json!({"schemaVersion": "2.0"})),
    )
    .await;

    let err = http_engine(&server)
        .evaluate(&PolicyEvaluationContext::new("future", "place_order"))
        .await
        .unwrap_err();
    assert!(matches!(err, PolicyError::UnsupportedSchema(v) if v == "2.0"));
}

#[tokio::test]
async fn test_http_source_status_errors() {
    let server = MockServer::start().await;
    serve_manifest(&server, "broken", ResponseTemplate::new(503).set_body_string("down")).await;
    let source = HttpManifestSource::new(HttpManifestConfig::new(server.uri())).unwrap();

    match source.fetch("broken").await {
        Err(ManifestFetchError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "down");
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    assert!(matches!(
        source.fetch("missing").await,
        Err(ManifestFetchError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_live_environment_raises_score() {
    let engine = PolicyEngine::new(StaticManifestSource::new());
    let paper = engine
        .evaluate(&PolicyEvaluationContext::new("w", "place_order"))
        .await
        .unwrap();
    let live = engine
        .evaluate(
            &PolicyEvaluationContext::new("w", "place_order")
                .with_environment(EnvironmentContext::live()),
        )
        .await
        .unwrap();

    assert_eq!(live.risk_score - paper.risk_score, 10.0);
}

#[test]
fn test_static_engine_blocking() {
    let manifest = ManifestDocument::from_json(
        r#"{"actions": {"withdraw": {"blocked": true}}, "riskAssessment": {"residualRiskScore": 0}}"#,
    )
    .unwrap();
    let engine = PolicyEngine::new(StaticManifestSource::new().with_manifest("wallet", manifest));

    let result = tokio_test::block_on(
        engine.evaluate(
            &PolicyEvaluationContext::new("wallet", "withdraw").with_input("amount", json!(250)),
        ),
    )
    .unwrap();
    assert!(result.is_blocked());

    // Default manifest values without the residual floor: 34.2
    let view = tokio_test::block_on(engine.evaluate(&PolicyEvaluationContext::new("wallet", "view")))
        .unwrap();
    assert_eq!(view.decision, Decision::Green);
}

#[test]
fn test_result_serializes_camel_case() {
    let engine = PolicyEngine::new(StaticManifestSource::new());
    let result =
        tokio_test::block_on(engine.evaluate(&PolicyEvaluationContext::new("w", "a"))).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["decision"], "amber");
    assert_eq!(json["riskLevel"], "medium");
    assert_eq!(json["manifestSource"], "fallback");
    assert!(json["evaluationId"].is_string());
    assert!(json["evaluatedAt"].is_string());
}
