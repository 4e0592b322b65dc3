//! Domain entities - core business objects

mod session;

pub use session::{Fields, Session};
