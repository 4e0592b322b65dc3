//! Process-local session store.
//!
//! Used when `STORE_BACKEND=memory` and as the store behind dispatcher tests.
//! Nothing survives a restart.

use async_trait::async_trait;
use dashmap::DashMap;
use push_core::{RepoResult, Session, SessionRepository};

/// In-memory session store with a token index
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
    tokens: DashMap<String, String>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionStore {
    async fn get_by_token(&self, token: &str) -> RepoResult<Option<Session>> {
        let id = self.tokens.get(token).map(|entry| entry.value().clone());
        Ok(id.and_then(|id| self.sessions.get(&id).map(|entry| entry.value().clone())))
    }

    async fn get_by_id(&self, id: &str) -> RepoResult<Option<Session>> {
        Ok(self.sessions.get(id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, session: &Session) -> RepoResult<()> {
        self.tokens.insert(session.token.clone(), session.id.clone());
        self.sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        if let Some((_, session)) = self.sessions.remove(id) {
            self.tokens.remove_if(&session.token, |_, indexed| indexed == id);
        }
        Ok(())
    }
}
