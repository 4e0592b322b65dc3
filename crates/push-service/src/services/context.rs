//! Service context - dependency container for services
//!
//! Holds the session store and push gateway the dispatcher works against.
//! Both are trait objects so tests can swap in in-memory fakes.

use std::sync::Arc;

use push_common::{AppError, AppResult, MessagingConfig};
use push_core::{PushGateway, SessionRepository};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    session_repo: Arc<dyn SessionRepository>,
    gateway: Arc<dyn PushGateway>,
    messaging: MessagingConfig,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        gateway: Arc<dyn PushGateway>,
        messaging: MessagingConfig,
    ) -> Self {
        Self {
            session_repo,
            gateway,
            messaging,
        }
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the push gateway
    pub fn gateway(&self) -> &dyn PushGateway {
        self.gateway.as_ref()
    }

    /// Topic that receives new-user and user-online notices
    pub fn profile_topic(&self) -> &str {
        &self.messaging.profile_topic
    }
}

/// Builder for ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    session_repo: Option<Arc<dyn SessionRepository>>,
    gateway: Option<Arc<dyn PushGateway>>,
    messaging: Option<MessagingConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn gateway(mut self, gateway: Arc<dyn PushGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    #[must_use]
    pub fn messaging(mut self, messaging: MessagingConfig) -> Self {
        self.messaging = Some(messaging);
        self
    }

    /// Build the ServiceContext
    ///
    /// A missing adapter is a wiring fault, reported as [`AppError::Config`].
    pub fn build(self) -> AppResult<ServiceContext> {
        let missing = |what: &str| AppError::Config(format!("{what} is required"));
        Ok(ServiceContext::new(
            self.session_repo.ok_or_else(|| missing("session_repo"))?,
            self.gateway.ok_or_else(|| missing("gateway"))?,
            self.messaging.unwrap_or_default(),
        ))
    }
}
