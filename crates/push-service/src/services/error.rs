//! Service layer error types
//!
//! Every dispatch failure lands in one of four categories, each with a
//! fixed HTTP status.

use push_core::DomainError;
use std::fmt;
use thiserror::Error;

/// Service layer error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or incomplete event
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced session does not exist
    #[error("{0}")]
    NotFound(String),

    /// Event contradicts the stored session
    #[error("{0}")]
    Conflict(String),

    /// Session store or push gateway call failed
    #[error("{step}: {message}")]
    Upstream { step: &'static str, message: String },
}

impl ServiceError {
    /// Wrap a failed store or gateway call, naming the step that failed
    pub fn upstream(step: &'static str, err: impl fmt::Display) -> Self {
        Self::Upstream {
            step,
            message: err.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Upstream { .. } => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Upstream { .. } => "UPSTREAM_FAILURE",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        if err.is_validation() {
            Self::InvalidInput(err.to_string())
        } else if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else if err.is_conflict() {
            Self::Conflict(err.to_string())
        } else {
            Self::upstream("Upstream call failed", err)
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
