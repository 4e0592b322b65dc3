//! FCM request and response bodies

use push_core::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Text used when the event carries no `message` field
pub const DEFAULT_MESSAGE: &str = "No message";

/// Body for a single-device send
#[derive(Debug, Serialize)]
pub(crate) struct DeviceMessage<'a> {
    pub registration_ids: [&'a str; 1],
    pub data: Value,
}

/// Body for a topic broadcast
#[derive(Debug, Serialize)]
pub(crate) struct TopicMessage {
    pub to: String,
    pub data: Value,
}

/// Build the `data` section of an FCM message from event fields
///
/// A truthy `message` field is kept, otherwise it is set to [`DEFAULT_MESSAGE`].
/// Missing fields become `{"empty": true}`; non-object fields are wrapped
/// under `value`.
pub fn message_data(fields: Option<&Value>) -> Value {
    let mut data = match fields {
        None | Some(Value::Null) => {
            let mut map = Map::new();
            map.insert("empty".to_string(), Value::Bool(true));
            map
        }
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            let mut map = Map::new();
            map.insert("value".to_string(), other.clone());
            map
        }
    };

    let message = data
        .get("message")
        .filter(|m| is_truthy(m))
        .cloned()
        .unwrap_or_else(|| json!(DEFAULT_MESSAGE));
    data.insert("message".to_string(), message);

    Value::Object(data)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Per-recipient result in a send response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FcmResult {
    pub message_id: Option<String>,
    pub error: Option<String>,
}

/// Response body shared by the send and Instance ID endpoints
///
/// Every field is optional: a topic subscription answers `{}` on success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FcmResponse {
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub failure: u64,
    #[serde(default)]
    pub results: Vec<FcmResult>,
    pub message_id: Option<Value>,
    pub error: Option<String>,
}

impl FcmResponse {
    /// Turn an application-level failure into an error
    pub fn into_result(self) -> Result<Self, GatewayError> {
        if let Some(error) = &self.error {
            return Err(GatewayError::Rejected(error.clone()));
        }
        if self.failure > 0 {
            let reason = self
                .results
                .iter()
                .find_map(|r| r.error.clone())
                .unwrap_or_else(|| format!("{} message(s) failed", self.failure));
            return Err(GatewayError::Rejected(reason));
        }
        Ok(self)
    }
}
