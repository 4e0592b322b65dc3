//! Event dispatcher
//!
//! Runs one push event against the session store and the push gateway.
//! Each event is a short, fail-fast chain of awaits; the first failing step
//! ends the dispatch and nothing already written is rolled back.

use push_core::{DomainError, Fields, PushEvent, Session, TopicNotice};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::dto::{EventReply, EventRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Event dispatcher
pub struct Dispatcher<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Dispatcher<'a> {
    /// Create a new Dispatcher
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and execute one event
    ///
    /// Validation runs before any store or gateway call. On success the
    /// request is echoed back with `ok: true` plus event-specific fields.
    #[instrument(skip(self, request), fields(event = %request.event))]
    pub async fn dispatch(&self, request: EventRequest) -> ServiceResult<EventReply> {
        let event = request.to_event().map_err(|e| {
            warn!(error = %e, "Rejected event");
            ServiceError::from(e)
        })?;

        match event {
            PushEvent::Register { token, fields } => self.register(request, &token, fields).await,
            PushEvent::Unregister { user_id, token } => {
                self.unregister(request, &user_id, token.as_deref()).await
            }
            PushEvent::Message { user_id, fields } => {
                self.message(request, &user_id, fields.as_ref()).await
            }
            PushEvent::Topic { topic, fields } => self.topic(request, &topic, fields.as_ref()).await,
        }
    }

    /// Create a session for an unseen token, or announce the existing one
    async fn register(
        &self,
        request: EventRequest,
        token: &str,
        fields: Fields,
    ) -> ServiceResult<EventReply> {
        debug!("Looking up session by token");
        let existing = self
            .ctx
            .session_repo()
            .get_by_token(token)
            .await
            .map_err(|e| ServiceError::upstream("Failed to query", e))?;

        match existing {
            Some(session) => {
                info!(user_id = %session.id, "Token already registered");
                self.announce(token, &TopicNotice::user_online(&session.id))
                    .await?;
                let record = session.to_value();
                Ok(EventReply::existing(request, session.id, record))
            }
            None => {
                let session = Session::register(token, fields);
                info!(user_id = %session.id, "Creating session for token");
                self.ctx
                    .session_repo()
                    .put(&session)
                    .await
                    .map_err(|e| ServiceError::upstream("Failed to register", e))?;
                self.announce(token, &TopicNotice::new_user(&session.id))
                    .await?;
                Ok(EventReply::created(request, session.id))
            }
        }
    }

    /// Subscribe the token to the profile topic and broadcast the notice
    async fn announce(&self, token: &str, notice: &TopicNotice) -> ServiceResult<()> {
        let topic = self.ctx.profile_topic();

        self.ctx
            .gateway()
            .subscribe_token_to_topic(token, topic)
            .await
            .map_err(|e| ServiceError::upstream("Failed to subscribe to topic", e))?;
        debug!(topic = %topic, "Subscribed token to profile topic");

        self.ctx
            .gateway()
            .send_to_topic(topic, Some(&notice.to_value()))
            .await
            .map_err(|e| ServiceError::upstream("Failed to send to topic", e))?;
        info!(topic = %topic, user_id = %notice.user_id, "Broadcast profile notice");

        Ok(())
    }

    /// Delete a session when the caller proves ownership with its token
    async fn unregister(
        &self,
        request: EventRequest,
        user_id: &str,
        token: Option<&str>,
    ) -> ServiceResult<EventReply> {
        let session = self
            .ctx
            .session_repo()
            .get_by_id(user_id)
            .await
            .map_err(|e| ServiceError::upstream("Failed to unregister", e))?;

        let Some(session) = session else {
            info!(user_id = %user_id, "Session already absent");
            return Ok(EventReply::ok(request));
        };

        if !session.matches_token(token) {
            warn!(user_id = %user_id, "Unregister token does not match session");
            return Err(DomainError::TokenMismatch.into());
        }

        self.ctx
            .session_repo()
            .delete(&session.id)
            .await
            .map_err(|e| ServiceError::upstream("Failed to unregister", e))?;
        info!(user_id = %user_id, "Session removed");

        Ok(EventReply::ok(request))
    }

    /// Push a payload to the device behind a session
    async fn message(
        &self,
        request: EventRequest,
        user_id: &str,
        fields: Option<&Value>,
    ) -> ServiceResult<EventReply> {
        let session = self
            .ctx
            .session_repo()
            .get_by_id(user_id)
            .await
            .map_err(|e| ServiceError::upstream("Failed to query", e))?
            .ok_or_else(|| DomainError::SessionNotFound(user_id.to_string()))?;

        self.ctx
            .gateway()
            .send_to_token(&session.token, fields)
            .await
            .map_err(|e| ServiceError::upstream("Failed to send message", e))?;
        info!(user_id = %user_id, "Message sent");

        Ok(EventReply::ok(request))
    }

    /// Broadcast a payload to a topic
    async fn topic(
        &self,
        request: EventRequest,
        topic: &str,
        fields: Option<&Value>,
    ) -> ServiceResult<EventReply> {
        self.ctx
            .gateway()
            .send_to_topic(topic, fields)
            .await
            .map_err(|e| ServiceError::upstream("Failed to send to topic", e))?;
        info!(topic = %topic, "Topic message sent");

        Ok(EventReply::ok(request))
    }
}
