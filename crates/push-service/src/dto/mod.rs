//! Data transfer objects for API requests and responses
//!
//! - `EventRequest` is the wire payload of the messaging endpoint
//! - `EventReply` echoes the request with the dispatch outcome

pub mod requests;
pub mod responses;

pub use requests::EventRequest;
pub use responses::{EventReply, HealthChecks, HealthResponse, ReadinessResponse};
