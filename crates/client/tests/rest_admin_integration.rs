//! Integration tests for the operator REST client.
//!
//! Run with: cargo test --test rest_admin_integration

mod common;

use common::*;
use disasterwatch_client::{ClientError, Session, SessionEvent};
use domain::models::{AlertStatus, ShelterDraft, ShelterPatch, ShelterStatus};
use httpmock::prelude::*;
use serde_json::json;

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_login_persists_token_and_user() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login/")
                .json_body(json!({"username": "admin", "password": "secret"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "token": TEST_TOKEN,
                    "user": {"id": 1, "username": "admin", "full_name": "Maria Santos"}
                }));
        })
        .await;

    let session = Session::in_memory();
    let mut events = session.subscribe();
    let client = admin_client(&server, session.clone());

    let response = client.login("admin", "secret").await.unwrap();

    login.assert_async().await;
    assert_eq!(response.token, TEST_TOKEN);
    assert_eq!(session.token().unwrap().as_deref(), Some(TEST_TOKEN));
    assert_eq!(
        session.user().unwrap().map(|u| u.username),
        Some("admin".to_string())
    );
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn);
}

#[tokio::test]
async fn test_login_failure_uses_error_field() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login/");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(json!({"error": "Invalid credentials"}));
        })
        .await;

    let session = Session::in_memory();
    let client = admin_client(&server, session.clone());

    let err = client.login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!session.is_authenticated().unwrap());
}

#[tokio::test]
async fn test_login_failure_without_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login/");
            then.status(500).body("upstream unavailable");
        })
        .await;

    let client = admin_client(&server, Session::in_memory());

    let err = client.login("admin", "secret").await.unwrap_err();
    assert!(matches!(err, ClientError::Login(ref m) if m == "Login failed"));
}

#[tokio::test]
async fn test_login_rejects_blank_credentials_without_request() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login/");
            then.status(200);
        })
        .await;

    let client = admin_client(&server, Session::in_memory());

    let err = client.login("", "secret").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    login.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_logout_clears_session_locally() {
    let server = MockServer::start_async().await;
    let session = logged_in_session();
    let client = admin_client(&server, session.clone());

    client.logout().unwrap();

    assert!(session.token().unwrap().is_none());
    assert!(client.current_user().unwrap().is_none());
}

// ============================================================================
// Transport policy
// ============================================================================

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let server = MockServer::start_async().await;
    let shelters = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/shelters/")
                .query_param("page", "1")
                .header("authorization", format!("Bearer {}", TEST_TOKEN))
                .header("content-type", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(vec![
                    shelter_json(1, "Butuan City Sports Complex", "active"),
                    shelter_json(2, "Libertad Elementary School", "full"),
                ]));
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let result = client.shelters(1).await.unwrap();

    shelters.assert_async().await;
    assert_eq!(result.count, 2);
    assert_eq!(result.results[1].status, ShelterStatus::Full);
    assert_eq!(result.results[0].latitude, Some(8.9475));
}

#[tokio::test]
async fn test_page_number_sent_verbatim() {
    let server = MockServer::start_async().await;
    let shelters = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/shelters/").query_param("page", "0");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page(vec![]));
        })
        .await;

    let client = admin_client(&server, logged_in_session());
    client.shelters(0).await.unwrap();

    shelters.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_expires_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/alerts/");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({"detail": "Invalid token."}));
        })
        .await;

    let session = logged_in_session();
    let mut events = session.subscribe();
    let client = admin_client(&server, session.clone());

    let err = client.alerts(1).await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert_eq!(err.to_string(), "Unauthorized - please login again");
    assert_eq!(err.status(), Some(401));
    assert!(session.token().unwrap().is_none());
    assert!(session.user().unwrap().is_none());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn test_unauthorized_with_html_body_expires_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/shelters/");
            then.status(401)
                .header("content-type", "text/html")
                .body("<html><body><h1>401 Unauthorized</h1></body></html>");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/alerts/");
            then.status(401);
        })
        .await;

    let session = logged_in_session();
    let mut events = session.subscribe();
    let client = admin_client(&server, session.clone());

    let err = client.shelters(1).await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(session.token().unwrap().is_none());
    assert!(session.user().unwrap().is_none());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);

    // An empty body is treated the same way.
    let err = client.alerts(1).await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));
}

#[tokio::test]
async fn test_error_field_is_surfaced_verbatim() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/shelters/");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(json!({"error": "Shelter name already exists"}));
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let err = client
        .create_shelter(&ShelterDraft::new("Butuan City Sports Complex"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Shelter name already exists");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_detail_field_when_no_error_field() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/shelters/99/");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(json!({"detail": "Not found."}));
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let err = client.shelter(99).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Http { status: 404, ref message } if message == "Not found."
    ));
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/earthquakes/recent/");
            then.status(500).body("<html>Internal Server Error</html>");
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let err = client.recent_earthquakes().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
    assert_eq!(err.status(), Some(500));
}

// ============================================================================
// Resources
// ============================================================================

#[tokio::test]
async fn test_create_shelter_posts_draft() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/shelters/")
                .json_body(json!({"name": "Ampayon Gym", "capacity": 250}));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(shelter_json(7, "Ampayon Gym", "inactive"));
        })
        .await;

    let client = admin_client(&server, logged_in_session());
    let draft = ShelterDraft {
        max_capacity: Some(250),
        ..ShelterDraft::new("Ampayon Gym")
    };

    let shelter = client.create_shelter(&draft).await.unwrap();

    create.assert_async().await;
    assert_eq!(shelter.id, 7);
    assert_eq!(shelter.status, ShelterStatus::Inactive);
}

#[tokio::test]
async fn test_invalid_draft_is_not_sent() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/shelters/");
            then.status(201);
        })
        .await;

    let client = admin_client(&server, logged_in_session());
    let draft = ShelterDraft {
        latitude: Some(123.0),
        ..ShelterDraft::new("Ampayon Gym")
    };

    let err = client.create_shelter(&draft).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    create.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_update_and_delete_shelter() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/shelters/3/")
                .body_includes(r#""status":"full""#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(shelter_json(3, "Tiniwisan Covered Court", "full"));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/shelters/3/");
            then.status(204);
        })
        .await;

    let client = admin_client(&server, logged_in_session());
    let patch = ShelterPatch {
        status: Some(ShelterStatus::Full),
        ..Default::default()
    };

    let updated = client.update_shelter(3, &patch).await.unwrap();
    client.delete_shelter(3).await.unwrap();

    update.assert_async().await;
    delete.assert_async().await;
    assert_eq!(updated.status, ShelterStatus::Full);
}

#[tokio::test]
async fn test_filtered_listings_use_query_paths() {
    let server = MockServer::start_async().await;
    let by_status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/alerts/by_status/")
                .query_param("status", "acknowledged");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([alert_json(4, "acknowledged")]));
        })
        .await;
    let by_region = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/shelters/by_region/")
                .query_param("region_id", "2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([shelter_json(5, "Cabadbaran Gym", "active")]));
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let alerts = client
        .alerts_by_status(AlertStatus::Acknowledged)
        .await
        .unwrap();
    let shelters = client.shelters_by_region(2).await.unwrap();

    by_status.assert_async().await;
    by_region.assert_async().await;
    assert_eq!(alerts[0].status, AlertStatus::Acknowledged);
    assert_eq!(shelters[0].name, "Cabadbaran Gym");
}

#[tokio::test]
async fn test_acknowledge_alert_posts_action() {
    let server = MockServer::start_async().await;
    let ack = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/alerts/12/acknowledge/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(alert_json(12, "acknowledged"));
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let alert = client.acknowledge_alert(12).await.unwrap();

    ack.assert_async().await;
    assert_eq!(alert.status, AlertStatus::Acknowledged);
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/earthquakes/recent/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"unexpected": true}));
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let err = client.recent_earthquakes().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_evacuees_and_notifications() {
    let server = MockServer::start_async().await;
    let evacuees = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/evacuees/by_shelter/")
                .query_param("shelter_id", "1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{
                    "id": 10,
                    "first_name": "Juan",
                    "last_name": "Dela Cruz",
                    "shelter": 1,
                    "status": "evacuated"
                }]));
        })
        .await;
    let notification = json!({
        "id": 3,
        "title": "Shelter nearly full",
        "message": "Butuan City Sports Complex is at 95% capacity",
        "notification_type": "capacity",
        "is_read": false
    });
    let unread = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/notifications/unread/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([notification.clone()]));
        })
        .await;
    let mark_read = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/notifications/3/mark_as_read/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": 3,
                    "title": "Shelter nearly full",
                    "message": "Butuan City Sports Complex is at 95% capacity",
                    "notification_type": "capacity",
                    "is_read": true
                }));
        })
        .await;

    let client = admin_client(&server, logged_in_session());

    let registered = client.evacuees_by_shelter(1).await.unwrap();
    let pending = client.unread_notifications().await.unwrap();
    let read = client.mark_notification_as_read(3).await.unwrap();

    evacuees.assert_async().await;
    unread.assert_async().await;
    mark_read.assert_async().await;
    assert_eq!(registered[0].full_name(), "Juan Dela Cruz");
    assert!(!pending[0].is_read);
    assert!(read.is_read);
}
