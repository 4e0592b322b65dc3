//! FCM HTTP client

use std::time::Duration;

use async_trait::async_trait;
use push_core::{GatewayError, GatewayResult, PushGateway};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::payload::{message_data, DeviceMessage, FcmResponse, TopicMessage};

/// Connection settings for [`FcmGateway`]
#[derive(Debug, Clone)]
pub struct FcmClientConfig {
    pub server_key: String,
    pub send_url: String,
    pub iid_url: String,
    pub timeout: Duration,
}

impl From<&push_common::FcmConfig> for FcmClientConfig {
    fn from(config: &push_common::FcmConfig) -> Self {
        Self {
            server_key: config.server_key.clone(),
            send_url: config.send_url.clone(),
            iid_url: config.iid_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Push gateway backed by Firebase Cloud Messaging
#[derive(Debug, Clone)]
pub struct FcmGateway {
    config: FcmClientConfig,
    client: reqwest::Client,
}

impl FcmGateway {
    /// Create a gateway with its own HTTP client
    pub fn new(config: FcmClientConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if config.server_key.is_empty() {
            warn!("FCM server key is empty; push calls will fail until FCM_SERVER_KEY is set");
        }

        Ok(Self { config, client })
    }

    /// Create a gateway from push-common config
    pub fn from_config(config: &push_common::FcmConfig) -> GatewayResult<Self> {
        Self::new(FcmClientConfig::from(config))
    }

    /// `{iid_url}/{token}/rel/topics/{topic}` with token and topic escaped
    /// as single path segments
    fn subscription_url(&self, token: &str, topic: &str) -> GatewayResult<Url> {
        let invalid = || GatewayError::NotConfigured("FCM_IID_URL");
        let mut url = Url::parse(&self.config.iid_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend([token, "rel", "topics", topic]);
        Ok(url)
    }

    /// POST a JSON body with the server key and decode the FCM reply
    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> GatewayResult<FcmResponse> {
        if self.config.server_key.is_empty() {
            return Err(GatewayError::NotConfigured("FCM_SERVER_KEY"));
        }

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("key={}", self.config.server_key))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        // Some endpoints answer with an empty or non-JSON body on success
        let decoded = if text.trim().is_empty() {
            FcmResponse::default()
        } else {
            serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?
        };
        decoded.into_result()
    }
}

#[async_trait]
impl PushGateway for FcmGateway {
    async fn send_to_token(&self, token: &str, payload: Option<&Value>) -> GatewayResult<()> {
        let body = DeviceMessage {
            registration_ids: [token],
            data: message_data(payload),
        };
        let response = self.post(&self.config.send_url, &body).await.inspect_err(|e| {
            warn!(error = %e, "sendMessage failed");
        })?;
        info!(success = response.success, "sendMessage response");
        Ok(())
    }

    async fn send_to_topic(&self, topic: &str, payload: Option<&Value>) -> GatewayResult<()> {
        let body = TopicMessage {
            to: format!("/topics/{topic}"),
            data: message_data(payload),
        };
        let response = self.post(&self.config.send_url, &body).await.inspect_err(|e| {
            warn!(topic = %topic, error = %e, "sendToTopic failed");
        })?;
        info!(topic = %topic, message_id = ?response.message_id, "sendToTopic response");
        Ok(())
    }

    async fn subscribe_token_to_topic(&self, token: &str, topic: &str) -> GatewayResult<()> {
        let url = self.subscription_url(token, topic)?;
        self.post(url.as_str(), &json!({})).await.inspect_err(|e| {
            warn!(topic = %topic, error = %e, "subscribeToTopic failed");
        })?;
        debug!(topic = %topic, "subscribeToTopic response");
        Ok(())
    }
}
