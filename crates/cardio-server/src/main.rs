mod dto;
mod error;
mod handlers;
mod router;
mod services;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use cardio_config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::ServerState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::load().context("invalid server configuration")?;
    let state = Arc::new(ServerState::from_artifact(&config.model_path));
    log_startup(&config, &state);

    let app = router::build_router(state, router::cors_layer(&config));

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn log_startup(config: &ServerConfig, state: &ServerState) {
    let loaded = if state.predictor.is_ready() { "Loaded" } else { "Not loaded" };
    info!("{}", "=".repeat(40));
    info!("HEART DISEASE PREDICTION API");
    info!("{}", "=".repeat(40));
    info!("Prediction:    http://localhost:{}/predict", config.port);
    info!("Feature Info:  http://localhost:{}/features", config.port);
    info!("Model artifact: {}", config.model_path.display());
    info!("Model and scaler: {}", loaded);
    info!("{}", "=".repeat(40));
}
