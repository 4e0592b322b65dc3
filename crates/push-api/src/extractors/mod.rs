//! Axum extractors for request handling

mod event_json;

pub use event_json::EventJson;
