use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;
use crate::prediction::cache::PredictionCache;
use crate::prediction::engine::PredictionWeights;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analyzer. Default: TfIdfAnalyzer.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// Process-wide prediction cache, shared by every request.
    pub cache: Arc<PredictionCache>,
    pub weights: Arc<PredictionWeights>,
}
