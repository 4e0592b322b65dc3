//! Integration test utilities for the push relay
//!
//! Spawns the HTTP API against an in-memory session store and a mock FCM
//! server, so the whole request path runs without external services.

pub mod fixtures;
pub mod mock_fcm;

pub use fixtures::*;
pub use helpers::*;
pub use mock_fcm::{CapturedRequest, MockFcm};
