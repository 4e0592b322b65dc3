//! # push-fcm
//!
//! Push gateway adapter for the Firebase Cloud Messaging legacy HTTP API.
//!
//! - single-device sends and topic broadcasts go to the FCM send endpoint
//! - topic subscriptions go to the Instance ID endpoint

mod client;
mod payload;

pub use client::{FcmClientConfig, FcmGateway};
pub use payload::{message_data, FcmResponse, FcmResult, DEFAULT_MESSAGE};
