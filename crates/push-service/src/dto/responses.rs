//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::requests::EventRequest;

// ============================================================================
// Messaging Responses
// ============================================================================

/// Successful dispatch reply: the request echoed back with the outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReply {
    #[serde(flatten)]
    pub request: EventRequest,
    pub ok: bool,
    /// Set on register: whether the token already had a session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing: Option<bool>,
}

impl EventReply {
    /// Plain success for unregister, message and topic
    pub fn ok(request: EventRequest) -> Self {
        Self {
            request,
            ok: true,
            existing: None,
        }
    }

    /// Reply for a newly created session
    pub fn created(mut request: EventRequest, user_id: String) -> Self {
        request.user_id = Some(user_id);
        Self {
            request,
            ok: true,
            existing: Some(false),
        }
    }

    /// Reply for a token that already had a session; `record` is the stored session
    pub fn existing(mut request: EventRequest, user_id: String, record: Value) -> Self {
        request.user_id = Some(user_id);
        request.fields = Some(record);
        Self {
            request,
            ok: true,
            existing: Some(true),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.request.user_id.as_deref()
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub session_store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                session_store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
