//! Session entity - links a push token to a user identifier

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Open mapping of extra profile fields supplied at registration
pub type Fields = Map<String, Value>;

/// A registered push session
///
/// Serializes as a flat JSON object: `{"id": .., "token": .., <fields>..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub token: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Session {
    /// Create a session with a freshly generated id
    pub fn register(token: impl Into<String>, fields: Fields) -> Self {
        Self::new(Uuid::new_v4().to_string(), token, fields)
    }

    /// Create a session with a known id
    ///
    /// `id` and `token` keys inside `fields` are dropped so the explicit
    /// values always win.
    pub fn new(id: impl Into<String>, token: impl Into<String>, mut fields: Fields) -> Self {
        fields.remove("id");
        fields.remove("token");
        Self {
            id: id.into(),
            token: token.into(),
            fields,
        }
    }

    /// Check whether this session was registered with the given token
    #[inline]
    pub fn matches_token(&self, token: Option<&str>) -> bool {
        token == Some(self.token.as_str())
    }

    /// Full record as a JSON object
    pub fn to_value(&self) -> Value {
        let mut record = Map::with_capacity(self.fields.len() + 2);
        record.insert("id".to_string(), Value::String(self.id.clone()));
        record.insert("token".to_string(), Value::String(self.token.clone()));
        for (key, value) in &self.fields {
            record.insert(key.clone(), value.clone());
        }
        Value::Object(record)
    }
}
