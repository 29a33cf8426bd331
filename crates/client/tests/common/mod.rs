//! Common test utilities for integration tests.
//!
//! Every test spins up its own `httpmock` server standing in for the
//! DisasterWatch backend or the chat-completion API.

// Allow dead code in this module - not every test binary uses every helper.
#![allow(dead_code)]

use disasterwatch_client::config::{AiConfig, BackendConfig};
use disasterwatch_client::{AdminClient, PublicClient, Session};
use domain::models::{AuthUser, LoginResponse, NearbyShelter};
use httpmock::MockServer;
use serde_json::{json, Value};

pub const TEST_TOKEN: &str = "test-token-123";
pub const CHAT_PATH: &str = "/openai/v1/chat/completions";
pub const PRIMARY_MODEL: &str = "primary-model";
pub const FALLBACK_MODEL: &str = "fallback-model";

/// Backend configuration pointing at the mock server.
pub fn backend_config(server: &MockServer) -> BackendConfig {
    BackendConfig {
        base_url: server.url("/api"),
        request_timeout_secs: 5,
    }
}

/// AI configuration pointing at the mock server, with a key.
pub fn ai_config(server: &MockServer) -> AiConfig {
    AiConfig {
        api_url: server.url(CHAT_PATH),
        api_key: Some("gsk_test".to_string()),
        primary_model: PRIMARY_MODEL.to_string(),
        fallback_model: FALLBACK_MODEL.to_string(),
        request_timeout_secs: 5,
        ..AiConfig::default()
    }
}

/// AI configuration pointing at the mock server, without a key.
pub fn ai_config_without_key(server: &MockServer) -> AiConfig {
    AiConfig {
        api_key: None,
        ..ai_config(server)
    }
}

/// Session that already holds a token and a user.
pub fn logged_in_session() -> Session {
    let session = Session::in_memory();
    session
        .save(&LoginResponse {
            token: TEST_TOKEN.to_string(),
            user: test_user(),
        })
        .expect("Failed to seed session");
    session
}

pub fn test_user() -> AuthUser {
    AuthUser {
        id: 1,
        username: "admin".to_string(),
        email: Some("admin@disasterwatch.ph".to_string()),
        full_name: Some("Maria Santos".to_string()),
        role: Some("admin".to_string()),
    }
}

pub fn admin_client(server: &MockServer, session: Session) -> AdminClient {
    AdminClient::new(&backend_config(server), session).expect("Failed to build admin client")
}

pub fn public_client(server: &MockServer) -> PublicClient {
    PublicClient::new(&backend_config(server)).expect("Failed to build public client")
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn shelter_json(id: i64, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "J.C. Aquino Avenue",
        "region": 1,
        "region_name": "Agusan del Norte",
        "status": status,
        "capacity": 300,
        "current_occupancy": 120,
        "latitude": "8.9475",
        "longitude": "125.5406"
    })
}

pub fn earthquake_json(id: i64, magnitude: &str) -> Value {
    json!({
        "id": id,
        "event_id": format!("EQ-{}", id),
        "magnitude": magnitude,
        "depth": "10.0",
        "latitude": "8.95",
        "longitude": "125.54",
        "region_name": "Agusan del Norte",
        "timestamp": "2024-11-20T08:30:00Z"
    })
}

pub fn alert_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "alert_type": "Earthquake",
        "severity": "high",
        "location": "Butuan City",
        "magnitude": "5.2",
        "status": status,
        "timestamp": "2024-11-20T08:35:00Z"
    })
}

pub fn page(results: Vec<Value>) -> Value {
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results
    })
}

/// Chat-completion success body carrying `content`.
pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Chat-completion error body in the OpenAI envelope.
pub fn completion_error(message: &str) -> Value {
    json!({"error": {"message": message, "type": "invalid_request_error"}})
}

pub fn nearby_shelters() -> Vec<NearbyShelter> {
    vec![
        NearbyShelter {
            name: "Butuan City Sports Complex".to_string(),
            address: Some("J.C. Aquino Avenue".to_string()),
            capacity: Some(500),
            distance: Some("1.2 km".to_string()),
            walk_time: Some("15 min".to_string()),
            latitude: Some(8.9475),
            longitude: Some(125.5406),
        },
        NearbyShelter {
            name: "Libertad Elementary School".to_string(),
            address: None,
            capacity: Some(200),
            distance: None,
            walk_time: None,
            latitude: None,
            longitude: None,
        },
    ]
}
