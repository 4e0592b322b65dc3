//! API Integration Tests
//!
//! Each test starts the HTTP server with the in-memory session store and a
//! mock FCM server. The Redis-backed tests additionally need `REDIS_URL`.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, redis_test_url, TestServer, MESSAGING_PATH,
    TEST_SERVER_KEY,
};
use reqwest::StatusCode;
use serde_json::json;

async fn register(server: &TestServer, token: &str) -> EventReply {
    let response = server
        .dispatch(&register_event(token, json!({"name": "Ann"})))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: HealthBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: ReadinessBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "ready");
    assert_eq!(body.checks.session_store, "healthy");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Register Tests
// ============================================================================

#[tokio::test]
async fn test_register_new_token() {
    let server = TestServer::start().await.unwrap();
    let token = unique_token();

    let reply = register(&server, &token).await;

    assert!(reply.ok);
    assert_eq!(reply.existing, Some(false));
    assert_eq!(reply.request.token.as_deref(), Some(token.as_str()));
    assert_eq!(reply.request.fields, Some(json!({"name": "Ann"})));
    let user_id = reply.user_id().expect("userId in reply").to_string();

    let subscriptions = server.fcm.subscriptions();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(
        subscriptions[0].path,
        format!("/iid/v1/{token}/rel/topics/profile-update")
    );
    assert_eq!(
        subscriptions[0].authorization.as_deref(),
        Some(format!("key={TEST_SERVER_KEY}").as_str())
    );

    let sends = server.fcm.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].body["to"], "/topics/profile-update");
    assert_eq!(sends[0].body["data"]["code"], "new-user");
    assert_eq!(sends[0].body["data"]["userId"], user_id.as_str());
    assert_eq!(sends[0].body["data"]["message"], "No message");
}

#[tokio::test]
async fn test_register_same_token_twice() {
    let server = TestServer::start().await.unwrap();
    let token = unique_token();

    let first = register(&server, &token).await;
    let response = server
        .dispatch(&register_event(&token, json!({"name": "Bob"})))
        .await
        .unwrap();
    let second: EventReply = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(second.existing, Some(true));
    assert_eq!(second.user_id(), first.user_id());

    let record = second.request.fields.expect("stored record");
    assert_eq!(record["name"], "Ann");
    assert_eq!(record["token"], token.as_str());
    assert_eq!(record["id"], first.user_id().unwrap());

    let sends = server.fcm.sends();
    assert_eq!(sends.len(), 2);
    assert_eq!(sends[1].body["data"]["code"], "user-online");
}

#[tokio::test]
async fn test_register_without_token() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .dispatch(&json!({"event": "register", "fields": {}}))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_INPUT");
    assert_eq!(body.error.message, "No token specified");
    assert!(server.fcm.requests().is_empty());
}

#[tokio::test]
async fn test_register_gateway_failure() {
    let server = TestServer::start().await.unwrap();
    server
        .fcm
        .respond_with(StatusCode::UNAUTHORIZED, json!({"error": "bad key"}));

    let response = server
        .dispatch(&register_event(&unique_token(), json!({})))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert_eq!(body.error.code, "UPSTREAM_FAILURE");
    assert!(body.error.message.starts_with("Failed to subscribe to topic"));
}

// ============================================================================
// Unregister Tests
// ============================================================================

#[tokio::test]
async fn test_unregister_then_register_again() {
    let server = TestServer::start().await.unwrap();
    let token = unique_token();
    let first = register(&server, &token).await;
    let user_id = first.user_id().unwrap();

    let response = server
        .dispatch(&unregister_event(user_id, &token))
        .await
        .unwrap();
    let reply: EventReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reply.ok);

    // The token is free again, so the next register creates a new session
    let again = register(&server, &token).await;
    assert_eq!(again.existing, Some(false));
    assert_ne!(again.user_id(), first.user_id());
}

#[tokio::test]
async fn test_unregister_wrong_token() {
    let server = TestServer::start().await.unwrap();
    let token = unique_token();
    let first = register(&server, &token).await;
    let user_id = first.user_id().unwrap();

    let response = server
        .dispatch(&unregister_event(user_id, "WRONG"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "CONFLICT");

    // Session survives: registering again finds it
    let again = register(&server, &token).await;
    assert_eq!(again.existing, Some(true));
    assert_eq!(again.user_id(), Some(user_id));
}

#[tokio::test]
async fn test_unregister_unknown_user() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .dispatch(&unregister_event("nobody", "T1"))
        .await
        .unwrap();
    let reply: EventReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reply.ok);
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_message_registered_user() {
    let server = TestServer::start().await.unwrap();
    let token = unique_token();
    let user = register(&server, &token).await;
    server.fcm.clear();

    let response = server
        .dispatch(&message_event(
            user.user_id().unwrap(),
            json!({"hello": "World!", "message": "hi"}),
        ))
        .await
        .unwrap();
    let reply: EventReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reply.ok);

    let sends = server.fcm.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(
        sends[0].body,
        json!({
            "registration_ids": [token],
            "data": {"hello": "World!", "message": "hi"}
        })
    );
}

#[tokio::test]
async fn test_message_unknown_user() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .dispatch(&message_event("U1", json!({"hello": "World!"})))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(body.error.code, "NOT_FOUND");
    assert_eq!(body.error.message, "Cant find session: U1");
    assert!(server.fcm.requests().is_empty());
}

#[tokio::test]
async fn test_message_rejected_by_fcm() {
    let server = TestServer::start().await.unwrap();
    let user = register(&server, &unique_token()).await;
    server.fcm.respond_with(
        StatusCode::OK,
        json!({"success": 0, "failure": 1, "results": [{"error": "NotRegistered"}]}),
    );

    let response = server
        .dispatch(&message_event(user.user_id().unwrap(), json!({})))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert!(body.error.message.contains("NotRegistered"));
}

// ============================================================================
// Topic Tests
// ============================================================================

#[tokio::test]
async fn test_topic_broadcast() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .dispatch(&topic_event("profile-update", json!({"code": "user-online"})))
        .await
        .unwrap();
    let reply: EventReply = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reply.ok);
    assert_eq!(reply.request.topic.as_deref(), Some("profile-update"));

    let requests = server.fcm.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body["to"], "/topics/profile-update");
    assert_eq!(requests[0].body["data"]["code"], "user-online");
}

#[tokio::test]
async fn test_topic_without_name() {
    let server = TestServer::start().await.unwrap();

    let response = server.dispatch(&json!({"event": "topic"})).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "No topic specified");
}

// ============================================================================
// Payload Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_event_kind() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .dispatch(&json!({"event": "broadcast", "topic": "news"}))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "Invalid event type: broadcast");
}

#[tokio::test]
async fn test_malformed_json() {
    let server = TestServer::start().await.unwrap();

    let response = server.post_raw(MESSAGING_PATH, "{not json").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_INPUT");
    assert!(body.error.message.starts_with("Exception processing event:"));
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/nothing").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_rate_limited_request_has_error_body() {
    let server = TestServer::start_with(&[
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1"),
        ("RATE_LIMIT_BURST", "1"),
    ])
    .await
    .unwrap();
    let event = topic_event("news", json!({}));

    let first = server.dispatch(&event).await.unwrap();
    assert_status(first, StatusCode::OK).await.unwrap();

    let second = server.dispatch(&event).await.unwrap();
    let body: ErrorBody = assert_json(second, StatusCode::TOO_MANY_REQUESTS)
        .await
        .unwrap();
    assert_eq!(body.error.code, "RATE_LIMITED");

    // Health probes are outside the quota
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Redis Store Tests
// ============================================================================

#[tokio::test]
async fn test_redis_register_and_unregister() {
    let Some(url) = redis_test_url() else {
        return;
    };
    let table = format!("push-test-{}", uuid::Uuid::new_v4());
    let server = TestServer::start_with(&[
        ("STORE_BACKEND", "redis"),
        ("REDIS_URL", url.as_str()),
        ("SESSION_TABLE_NAME", table.as_str()),
    ])
    .await
    .expect("Failed to start server");

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let token = unique_token();
    let first = register(&server, &token).await;
    let second = register(&server, &token).await;
    assert_eq!(second.existing, Some(true));
    assert_eq!(second.user_id(), first.user_id());

    let response = server
        .dispatch(&unregister_event(first.user_id().unwrap(), &token))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .dispatch(&message_event(first.user_id().unwrap(), json!({})))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
