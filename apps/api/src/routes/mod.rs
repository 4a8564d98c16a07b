pub mod health;
pub mod validation;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::prediction::handlers as prediction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route("/api/v1/analysis/score", post(analysis::handle_score))
        .route("/api/v1/analysis/batch", post(analysis::handle_batch_analyze))
        // Prediction API
        .route("/api/v1/predict", post(prediction::handle_predict))
        .route("/api/v1/predict/batch", post(prediction::handle_batch_predict))
        .route("/api/v1/cache/stats", get(prediction::handle_cache_stats))
        .route("/api/v1/cache", delete(prediction::handle_clear_cache))
        .with_state(state)
}
