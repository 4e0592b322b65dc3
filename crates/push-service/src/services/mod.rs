//! Business logic services
//!
//! The dispatcher maps each push event onto store lookups, store writes,
//! and push gateway calls.

pub mod context;
pub mod dispatcher;
pub mod error;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use dispatcher::Dispatcher;
pub use error::{ServiceError, ServiceResult};
