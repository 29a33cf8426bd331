//! Integration tests for the operator recommendation service against a mock
//! chat-completion API.
//!
//! Run with: cargo test --test ai_admin_integration

mod common;

use common::*;
use disasterwatch_client::ai::admin::{EMPTY_TIP, FAILED_TIP};
use disasterwatch_client::ai::{AdminContext, AreaQuery, RecommendationService};
use disasterwatch_client::ClientError;
use domain::models::AreaRiskAssessment;
use httpmock::prelude::*;
use serde_json::json;

fn service(server: &MockServer) -> RecommendationService {
    RecommendationService::new(&ai_config(server)).expect("Failed to build service")
}

fn recommendation_answer() -> String {
    json!({
        "mostRecommendedShelter": {
            "name": "Butuan City Sports Complex",
            "reason": "Largest remaining capacity",
            "region": "Agusan del Norte"
        },
        "mostAffectedArea": {
            "name": "Libertad",
            "reason": "Closest to the epicenter",
            "riskLevel": "high"
        },
        "accuracyRate": 87,
        "recommendations": [{
            "shelter": "Butuan City Sports Complex",
            "region": "Agusan del Norte",
            "recommendation": "Open the second gymnasium wing",
            "priority": "high",
            "confidence": 90
        }],
        "summary": "Capacity is adequate; monitor Libertad."
    })
    .to_string()
}

fn area() -> AreaQuery {
    AreaQuery {
        name: "Libertad".to_string(),
        latitude: 8.94,
        longitude: 125.50,
        recent_earthquakes: 3,
        shelters_nearby: 2,
    }
}

// ============================================================================
// generate_recommendations
// ============================================================================

#[tokio::test]
async fn test_fenced_answer_is_parsed() {
    let server = MockServer::start_async().await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .header("authorization", "Bearer gsk_test")
                .body_includes(r#""model":"primary-model""#)
                .body_includes(r#""max_tokens":2000"#)
                .body_includes(r#""top_p":1.0"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion(&format!("```json\n{}\n```", recommendation_answer())));
        })
        .await;

    let answer = service(&server)
        .generate_recommendations(&AdminContext::default())
        .await
        .unwrap();

    chat.assert_async().await;
    assert!(!answer.is_degraded());
    assert_eq!(answer.most_recommended_shelter.name, "Butuan City Sports Complex");
    assert_eq!(answer.most_affected_area.risk_level, "high");
    assert_eq!(answer.recommendations[0].confidence.as_deref(), Some("90"));
}

#[tokio::test]
async fn test_prose_answer_is_degraded() {
    let server = MockServer::start_async().await;
    let prose = "Shelters in Butuan are coping well. Keep monitoring aftershocks.";
    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion(prose));
        })
        .await;

    let answer = service(&server)
        .generate_recommendations(&AdminContext::default())
        .await
        .unwrap();

    assert!(answer.is_degraded());
    assert_eq!(answer.raw_response.as_deref(), Some(prose));
    assert_eq!(answer.summary, prose);
    assert_eq!(answer.most_recommended_shelter.name, "Analysis in progress");
}

#[tokio::test]
async fn test_rejected_model_falls_back_once() {
    let server = MockServer::start_async().await;
    let primary = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .body_includes(r#""model":"primary-model""#);
            then.status(404)
                .header("content-type", "application/json")
                .json_body(completion_error("The model `primary-model` does not exist"));
        })
        .await;
    let fallback = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .body_includes(r#""model":"fallback-model""#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion(&recommendation_answer()));
        })
        .await;

    let answer = service(&server)
        .generate_recommendations(&AdminContext::default())
        .await
        .unwrap();

    primary.assert_calls_async(1).await;
    fallback.assert_calls_async(1).await;
    assert_eq!(answer.most_affected_area.name, "Libertad");
}

#[tokio::test]
async fn test_server_error_does_not_fall_back() {
    let server = MockServer::start_async().await;
    let primary = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .body_includes(r#""model":"primary-model""#);
            then.status(500)
                .header("content-type", "application/json")
                .json_body(completion_error("Internal server error"));
        })
        .await;
    let fallback = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .body_includes(r#""model":"fallback-model""#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion(&recommendation_answer()));
        })
        .await;

    let err = service(&server)
        .generate_recommendations(&AdminContext::default())
        .await
        .unwrap_err();

    primary.assert_calls_async(1).await;
    fallback.assert_calls_async(0).await;
    assert!(matches!(err, ClientError::Completion { status: 500, .. }));
    assert_eq!(err.to_string(), "Internal server error");
}

#[tokio::test]
async fn test_error_without_message_reports_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(503).body("overloaded");
        })
        .await;

    let err = service(&server)
        .generate_recommendations(&AdminContext::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Groq API error: 503");
}

#[tokio::test]
async fn test_empty_content_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"choices": []}));
        })
        .await;

    let err = service(&server)
        .generate_recommendations(&AdminContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::EmptyCompletion));
    assert_eq!(err.to_string(), "No response content from AI");
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let server = MockServer::start_async().await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200);
        })
        .await;

    let service = RecommendationService::new(&ai_config_without_key(&server)).unwrap();

    let err = service
        .generate_recommendations(&AdminContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingApiKey));
    assert!(service.quick_safety_tip("aftershock").await.is_err());
    assert!(service.analyze_area_risk(&area()).await.is_err());

    chat.assert_calls_async(0).await;
}

// ============================================================================
// quick_safety_tip / analyze_area_risk
// ============================================================================

#[tokio::test]
async fn test_quick_tip_uses_fallback_model() {
    let server = MockServer::start_async().await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .body_includes(r#""model":"fallback-model""#)
                .body_includes(r#""max_tokens":100"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion("Keep exits clear for evacuees."));
        })
        .await;

    let tip = service(&server).quick_safety_tip("aftershock").await.unwrap();

    chat.assert_async().await;
    assert_eq!(tip, "Keep exits clear for evacuees.");
}

#[tokio::test]
async fn test_quick_tip_defaults() {
    let server = MockServer::start_async().await;
    let mut empty = server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion(""));
        })
        .await;

    let svc = service(&server);
    assert_eq!(svc.quick_safety_tip("aftershock").await.unwrap(), EMPTY_TIP);

    empty.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(500);
        })
        .await;

    assert_eq!(svc.quick_safety_tip("aftershock").await.unwrap(), FAILED_TIP);
}

#[tokio::test]
async fn test_area_risk_parsed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CHAT_PATH)
                .body_includes("Libertad");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion(
                    r#"{"riskLevel": "high", "score": 78, "factors": ["Near fault line"], "recommendation": "Pre-position supplies"}"#,
                ));
        })
        .await;

    let risk = service(&server).analyze_area_risk(&area()).await.unwrap();

    assert_eq!(risk.risk_level, "high");
    assert_eq!(risk.score, 78.0);
    assert_eq!(risk.factors, vec!["Near fault line".to_string()]);
}

#[tokio::test]
async fn test_area_risk_unavailable_on_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CHAT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion("I cannot assess this area."));
        })
        .await;

    let risk = service(&server).analyze_area_risk(&area()).await.unwrap();
    assert_eq!(risk, AreaRiskAssessment::unavailable());
}
