//! JSON body extractor for event payloads
//!
//! Wraps `axum::Json` so that a body that cannot be decoded is answered
//! with the same error shape as every other rejected event.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// JSON extractor that rejects with [`ApiError::InvalidBody`]
#[derive(Debug, Clone)]
pub struct EventJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for EventJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::invalid_body(e.body_text()))?;

        Ok(EventJson(value))
    }
}
