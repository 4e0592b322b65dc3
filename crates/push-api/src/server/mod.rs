//! Adapter wiring and the server entry points

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use push_cache::{MemorySessionStore, RedisPool, RedisSessionStore};
use push_common::{AppConfig, AppError, StoreBackend};
use push_core::{PushGateway, SessionRepository};
use push_fcm::FcmGateway;
use push_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = {
        let config = state.config();
        let api = apply_middleware_with_config(
            create_router(),
            &config.rate_limit,
            &config.cors,
            config.app.env.is_production(),
        );
        api.merge(apply_middleware(health_routes()))
    };
    router.with_state(state)
}

/// Initialize the configured session store and FCM gateway and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let session_repo: Arc<dyn SessionRepository> = match config.store.backend {
        StoreBackend::Redis => {
            let redis = config
                .redis
                .as_ref()
                .ok_or_else(|| AppError::Config("REDIS_URL is required for the redis store".into()))?;

            info!("Connecting to Redis...");
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Store(e.to_string()))?;
            match pool.health_check().await {
                Ok(()) => info!("Redis connection established"),
                Err(e) => warn!(error = %e, "Redis is not reachable yet"),
            }

            Arc::new(RedisSessionStore::new(pool, config.store.table_name.clone()))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory session store; sessions are lost on restart");
            Arc::new(MemorySessionStore::new())
        }
    };

    let gateway = FcmGateway::from_config(&config.fcm)
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    create_app_state_with(config, session_repo, Arc::new(gateway))
}

/// Create AppState from already constructed adapters
pub fn create_app_state_with(
    config: AppConfig,
    session_repo: Arc<dyn SessionRepository>,
    gateway: Arc<dyn PushGateway>,
) -> Result<AppState, AppError> {
    let service_context = ServiceContextBuilder::new()
        .session_repo(session_repo)
        .gateway(gateway)
        .messaging(config.messaging.clone())
        .build()?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr = tokio::net::lookup_host(&address)
        .await
        .map_err(|e| AppError::Config(format!("Invalid bind address {address}: {e}")))?
        .next()
        .ok_or_else(|| AppError::Config(format!("Bind address {address} did not resolve")))?;

    let app = create_app(create_app_state(config).await?);
    run_server(app, addr).await
}
