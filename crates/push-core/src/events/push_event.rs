//! Push event types
//!
//! A `PushEvent` is built once per request and never persisted. Each variant
//! carries exactly the fields its dispatch path needs, so a constructed event
//! is already known to be valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::Fields;
use crate::error::DomainError;

/// Kind of push event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Register,
    Unregister,
    Message,
    Topic,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Unregister => "unregister",
            Self::Message => "message",
            Self::Topic => "topic",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(Self::Register),
            "unregister" => Ok(Self::Unregister),
            "message" => Ok(Self::Message),
            "topic" => Ok(Self::Topic),
            other => Err(DomainError::InvalidEventType(other.to_string())),
        }
    }
}

/// A validated push event
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// Register a push token, creating a session if the token is unseen
    Register { token: String, fields: Fields },
    /// Remove a session; the token must match the stored one
    Unregister {
        user_id: String,
        token: Option<String>,
    },
    /// Send a message to a single session
    Message {
        user_id: String,
        fields: Option<Value>,
    },
    /// Broadcast to a topic
    Topic { topic: String, fields: Option<Value> },
}

/// Code of a profile-topic notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeCode {
    NewUser,
    UserOnline,
}

/// Notice broadcast to the profile topic on registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNotice {
    pub code: NoticeCode,
    pub user_id: String,
}

impl TopicNotice {
    pub fn new_user(user_id: impl Into<String>) -> Self {
        Self {
            code: NoticeCode::NewUser,
            user_id: user_id.into(),
        }
    }

    pub fn user_online(user_id: impl Into<String>) -> Self {
        Self {
            code: NoticeCode::UserOnline,
            user_id: user_id.into(),
        }
    }

    /// Notice as a JSON payload for the gateway
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "code": self.code,
            "userId": self.user_id,
        })
    }
}
