//! Domain errors

mod domain_error;
mod gateway_error;

pub use domain_error::DomainError;
pub use gateway_error::GatewayError;
