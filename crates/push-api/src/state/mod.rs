//! Shared handler state

use std::sync::Arc;

use push_common::AppConfig;
use push_service::{Dispatcher, ServiceContext};

/// Cheap-to-clone state handed to every handler
#[derive(Clone)]
pub struct AppState {
    services: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.services
    }

    /// Dispatcher bound to this state's store and gateway
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.services)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app", &self.config.app.name)
            .field("store", &self.config.store.backend)
            .field("profile_topic", &self.services.profile_topic())
            .finish_non_exhaustive()
    }
}
