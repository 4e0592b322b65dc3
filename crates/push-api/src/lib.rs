//! # push-api
//!
//! HTTP front end of the push relay, built with Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_app_state_with, run, run_server};
pub use state::AppState;
