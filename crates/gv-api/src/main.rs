//! # gv-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the GlassVault API.
//! Binds to a configurable port (default 8080).

use gv_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;
    tracing::info!(
        latency_ms = config.latency.as_millis() as u64,
        start_offline = config.start_offline,
        "configuration loaded"
    );

    let state = AppState::try_new(config).map_err(|e| {
        tracing::error!("failed to load reference datasets: {e}");
        e
    })?;

    let app = gv_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("GlassVault API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
