//! Test fixtures and data generators
//!
//! Builders for messaging payloads and the response bodies tests decode.

use serde::Deserialize;
use serde_json::{json, Value};

pub use push_service::EventReply;

/// A device token that no other test uses
pub fn unique_token() -> String {
    format!("token-{}", uuid::Uuid::new_v4())
}

/// Register payload
pub fn register_event(token: &str, fields: Value) -> Value {
    json!({
        "event": "register",
        "token": token,
        "userId": null,
        "fields": fields,
    })
}

/// Unregister payload
pub fn unregister_event(user_id: &str, token: &str) -> Value {
    json!({
        "event": "unregister",
        "token": token,
        "userId": user_id,
    })
}

/// Single-device message payload
pub fn message_event(user_id: &str, fields: Value) -> Value {
    json!({
        "event": "message",
        "userId": user_id,
        "fields": fields,
    })
}

/// Topic broadcast payload
pub fn topic_event(topic: &str, fields: Value) -> Value {
    json!({
        "event": "topic",
        "topicName": topic,
        "fields": fields,
    })
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Health response
#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

/// Readiness response
#[derive(Debug, Deserialize)]
pub struct ReadinessBody {
    pub status: String,
    pub checks: ReadinessChecks,
}

/// Readiness dependency checks
#[derive(Debug, Deserialize)]
pub struct ReadinessChecks {
    pub session_store: String,
}
