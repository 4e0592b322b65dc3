//! Push gateway trait - outbound calls to a third-party push service

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayError;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Send a message to a single device token
    async fn send_to_token(&self, token: &str, payload: Option<&Value>) -> GatewayResult<()>;

    /// Broadcast a message to every device subscribed to a topic
    async fn send_to_topic(&self, topic: &str, payload: Option<&Value>) -> GatewayResult<()>;

    /// Subscribe a device token to a topic
    async fn subscribe_token_to_topic(&self, token: &str, topic: &str) -> GatewayResult<()>;
}
