//! Push gateway errors

use thiserror::Error;

/// Errors reported by a push gateway adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Push gateway not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Push request failed: {0}")]
    Transport(String),

    #[error("Push service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Push service rejected request: {0}")]
    Rejected(String),

    #[error("Invalid push service response: {0}")]
    Decode(String),
}
