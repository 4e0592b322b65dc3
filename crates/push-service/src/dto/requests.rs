//! Request DTOs for the messaging endpoint

use push_core::{DomainError, EventKind, Fields, PushEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messaging request payload
///
/// `event` stays a plain string so that unknown kinds are reported as an
/// invalid event type instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub event: String,

    #[serde(default, alias = "topicName", skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Extra data: profile fields on register, payload on message/topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

impl EventRequest {
    pub fn new(kind: EventKind) -> Self {
        Self {
            event: kind.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Validate the payload and build the typed event
    ///
    /// # Errors
    /// Returns a validation error for an unknown kind, a missing required
    /// field, or register fields that are not an object.
    pub fn to_event(&self) -> Result<PushEvent, DomainError> {
        let kind: EventKind = self.event.parse()?;

        match kind {
            EventKind::Register => Ok(PushEvent::Register {
                token: required(self.token.as_deref(), "token")?,
                fields: register_fields(self.fields.as_ref())?,
            }),
            EventKind::Unregister => Ok(PushEvent::Unregister {
                user_id: required(self.user_id.as_deref(), "userId")?,
                token: self.token.clone(),
            }),
            EventKind::Message => Ok(PushEvent::Message {
                user_id: required(self.user_id.as_deref(), "userId")?,
                fields: self.fields.clone(),
            }),
            EventKind::Topic => Ok(PushEvent::Topic {
                topic: required(self.topic.as_deref(), "topic")?,
                fields: self.fields.clone(),
            }),
        }
    }
}

fn required(value: Option<&str>, name: &'static str) -> Result<String, DomainError> {
    value
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or(DomainError::MissingField(name))
}

fn register_fields(fields: Option<&Value>) -> Result<Fields, DomainError> {
    match fields {
        None | Some(Value::Null) => Ok(Fields::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(DomainError::InvalidFields(format!(
            "expected an object, got {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
