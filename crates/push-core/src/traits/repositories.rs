//! Repository traits (ports) - define the interface for session storage
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::Session;
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Session Repository
// ============================================================================

/// Key-value session table keyed by id, with a secondary index on token
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by its push token (at most one match)
    async fn get_by_token(&self, token: &str) -> RepoResult<Option<Session>>;

    /// Find a session by id
    async fn get_by_id(&self, id: &str) -> RepoResult<Option<Session>>;

    /// Store a session
    async fn put(&self, session: &Session) -> RepoResult<()>;

    /// Remove a session by id
    async fn delete(&self, id: &str) -> RepoResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
