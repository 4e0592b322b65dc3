//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("No {0} specified")]
    MissingField(&'static str),

    #[error("Invalid fields: {0}")]
    InvalidFields(String),

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Cant find session: {0}")]
    SessionNotFound(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("unregister requires matching token and userId")]
    TokenMismatch,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    Store(String),
}

impl DomainError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEventType(_) | Self::MissingField(_) | Self::InvalidFields(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::TokenMismatch)
    }
}
