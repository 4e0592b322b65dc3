//! Application-level errors
//!
//! Raised while wiring adapters and starting the server. Per-request
//! failures have their own types in the service and API layers.

/// Startup error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Session store unavailable or misbehaving
    #[error("Store error: {0}")]
    Store(String),

    /// Push gateway or another remote dependency failed
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Machine-readable code, logged when the server fails to start
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Store(_) => "STORE_ERROR",
            Self::ExternalService(_) => "UPSTREAM_FAILURE",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
