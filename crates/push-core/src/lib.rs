//! # push-core
//!
//! Domain layer containing the session entity, push events, and the adapter
//! traits (ports) for session storage and the push gateway.
//! This crate has zero dependencies on infrastructure (Redis, HTTP clients, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Fields, Session};
pub use error::{DomainError, GatewayError};
pub use events::{EventKind, PushEvent, TopicNotice};
pub use traits::{GatewayResult, PushGateway, RepoResult, SessionRepository};
