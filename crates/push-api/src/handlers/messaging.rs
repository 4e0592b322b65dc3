//! Messaging handler
//!
//! Single entry point for register, unregister, message and topic events.

use axum::{extract::State, Json};
use push_service::{EventReply, EventRequest};

use crate::extractors::EventJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Dispatch one push event
///
/// POST /api/v1/messaging
pub async fn handle_event(
    State(state): State<AppState>,
    EventJson(request): EventJson<EventRequest>,
) -> ApiResult<Json<EventReply>> {
    let reply = state.dispatcher().dispatch(request).await?;
    Ok(Json(reply))
}
