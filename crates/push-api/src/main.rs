//! Push API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p push-api
//! ```
//!
//! Configuration comes from the environment, with `.env` loaded first.

use anyhow::Context;
use push_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::from_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        store = ?config.store.backend,
        port = config.api.port,
        "Starting Push API Server..."
    );

    if let Err(e) = push_api::run(config).await {
        error!(code = e.error_code(), error = %e, "Server failed");
        return Err(e.into());
    }
    Ok(())
}
