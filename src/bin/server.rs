//! Taixiu Oracle Server - HTTP prediction service
//!
//! Fetches the upstream dice-result feed on every request, runs the pattern
//! detectors and answers with a next-round prediction.
//!
//! # Usage
//! ```sh
//! SERVER_PORT=5000 cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_BIND_ADDRESS` / `SERVER_PORT` - Listen address (default: 0.0.0.0:5000)
//! - `FEED_API_URL` - Upstream history endpoint
//! - `FEED_TIMEOUT_SECS` - Upstream request timeout (default: 30)
//! - `RUST_LOG` - Log filter (default: info)

use anyhow::{Context, Result};
use std::sync::Arc;
use taixiu_oracle::application::prediction_service::PredictionService;
use taixiu_oracle::config::Config;
use taixiu_oracle::infrastructure::observability::env_log_filter;
use taixiu_oracle::infrastructure::simulation::UniformJitter;
use taixiu_oracle::infrastructure::{HttpFeedProvider, InMemoryHistoryRepository};
use taixiu_oracle::interfaces::http::ENDPOINTS;
use taixiu_oracle::interfaces::{AppState, router};
use tracing::info;
use tracing_subscriber::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(env_log_filter())
        .with(stdout_layer)
        .init();

    info!("Taixiu Oracle {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Feed={}, Timeout={:?}",
        config.feed.api_url, config.feed.timeout
    );

    let feed = Arc::new(HttpFeedProvider::new(&config.feed));
    let history = Arc::new(InMemoryHistoryRepository::new(config.server.predictor_tag.clone()));
    let service = PredictionService::new(feed, history, Arc::new(UniformJitter));
    let app = router(AppState::new(service, config.server.banner.clone()));

    let address = config.server.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server running on http://{}", address);
    info!("Endpoints:");
    for (path, description) in ENDPOINTS {
        info!("  {} - {}", path, description);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received. Exiting...");
        })
        .await?;

    Ok(())
}
