mod analysis;
mod config;
mod errors;
mod prediction;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::TfIdfAnalyzer;
use crate::config::Config;
use crate::prediction::cache::PredictionCache;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume scoring API v{}", env!("CARGO_PKG_VERSION"));

    let weights = config.load_weights()?;
    match &config.prediction_weights_path {
        Some(path) => info!("Prediction weights loaded from {path}"),
        None => info!("Using baseline prediction weights"),
    }

    let cache = Arc::new(PredictionCache::new());
    info!(capacity = cache.stats().capacity, "Prediction cache initialized");

    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(TfIdfAnalyzer),
        cache,
        weights: Arc::new(weights),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
