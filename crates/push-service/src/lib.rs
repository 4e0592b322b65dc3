//! # push-service
//!
//! Application layer containing the event dispatcher, its dependency
//! container, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{EventReply, EventRequest, HealthChecks, HealthResponse, ReadinessResponse};
pub use services::{Dispatcher, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
