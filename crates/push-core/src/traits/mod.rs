//! Adapter traits (ports)

mod gateway;
mod repositories;

pub use gateway::{GatewayResult, PushGateway};
pub use repositories::{RepoResult, SessionRepository};
