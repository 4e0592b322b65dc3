//! Session storage in Redis.
//!
//! Layout, under a configurable namespace:
//! - `<ns>:session:<id>` holds the session record as JSON
//! - `<ns>:token:<token>` holds the id, acting as the secondary index

use async_trait::async_trait;
use push_core::{DomainError, RepoResult, Session, SessionRepository};

use crate::pool::{RedisPool, RedisPoolError};

/// Redis-backed session store
#[derive(Clone, Debug)]
pub struct RedisSessionStore {
    pool: RedisPool,
    namespace: String,
}

impl RedisSessionStore {
    /// Create a new session store under the given key namespace
    #[must_use]
    pub fn new(pool: RedisPool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }

    /// Redis key for a session record
    fn session_key(&self, id: &str) -> String {
        format!("{}:session:{id}", self.namespace)
    }

    /// Redis key for a token index entry
    fn token_key(&self, token: &str) -> String {
        format!("{}:token:{token}", self.namespace)
    }
}

fn store_error(err: RedisPoolError) -> DomainError {
    DomainError::Store(err.to_string())
}

#[async_trait]
impl SessionRepository for RedisSessionStore {
    async fn get_by_token(&self, token: &str) -> RepoResult<Option<Session>> {
        let Some(id) = self
            .pool
            .get_string(&self.token_key(token))
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };

        let session = self.get_by_id(&id).await?;
        if session.is_none() {
            tracing::warn!(token = %token, id = %id, "Token index points at a missing session");
        }
        Ok(session)
    }

    async fn get_by_id(&self, id: &str) -> RepoResult<Option<Session>> {
        self.pool
            .get_json(&self.session_key(id))
            .await
            .map_err(store_error)
    }

    async fn put(&self, session: &Session) -> RepoResult<()> {
        let record = serde_json::to_string(session)
            .map_err(|e| DomainError::Store(format!("Failed to encode session: {e}")))?;
        let session_key = self.session_key(&session.id);
        let token_key = self.token_key(&session.token);

        self.pool
            .set_atomic(&[
                (session_key.as_str(), record.as_str()),
                (token_key.as_str(), session.id.as_str()),
            ])
            .await
            .map_err(store_error)?;

        tracing::debug!(id = %session.id, "Stored session");
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        let session_key = self.session_key(id);
        let mut keys = vec![session_key];

        // Drop the index entry only while it still points at this session
        if let Some(session) = self.get_by_id(id).await? {
            let token_key = self.token_key(&session.token);
            let indexed = self
                .pool
                .get_string(&token_key)
                .await
                .map_err(store_error)?;
            if indexed.as_deref() == Some(id) {
                keys.push(token_key);
            }
        }

        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        let deleted = self.pool.delete_keys(&keys).await.map_err(store_error)?;

        tracing::debug!(id = %id, deleted = deleted, "Deleted session");
        Ok(())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.pool.health_check().await.map_err(store_error)
    }
}
