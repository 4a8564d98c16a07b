//! Axum route handlers for the Prediction API and its cache.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::tokenizer::tokenize;
use crate::errors::AppError;
use crate::prediction::cache::{CacheStats, PredictionCache};
use crate::prediction::engine::{batch_predict_optimized, predict_score_optimized};
use crate::prediction::features::{
    detect_industry, extract_features_optimized, FeatureMemo, FeatureSet,
};
use crate::prediction::keywords::{count_matches_chunked, KeywordTrie, DEFAULT_CHUNK_CHARS};
use crate::routes::validation::{validate_batch_size, validate_optional_text, validate_text};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    /// Overrides both the configured default and the detected industry.
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub score: f64,
    pub cached: bool,
    pub industry: Option<String>,
    pub features: FeatureSet,
    /// Occurrences of job-description keywords in the résumé.
    pub keyword_hits: usize,
}

#[derive(Debug, Deserialize)]
pub struct BatchPredictItem {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchPredictRequest {
    pub items: Vec<BatchPredictItem>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    /// One score per request item, in request order.
    pub scores: Vec<f64>,
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub stats: CacheStats,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Request industry, then the configured default, then (if `text` is given)
/// the industry detected in the text.
fn resolve_industry(requested: Option<&str>, state: &AppState, text: Option<&str>) -> Option<String> {
    non_blank(requested)
        .map(str::to_string)
        .or_else(|| state.config.default_industry.clone())
        .or_else(|| {
            text.and_then(detect_industry)
                .map(|(industry, _)| industry.to_string())
        })
}

fn keyword_hits(resume_text: &str, job_description: Option<&str>) -> usize {
    let Some(job_description) = job_description else {
        return 0;
    };
    let trie = KeywordTrie::new(&tokenize(job_description));
    if trie.is_empty() {
        return 0;
    }
    count_matches_chunked(&trie, resume_text, DEFAULT_CHUNK_CHARS)
}

/// Cache key for one prediction. The industry changes the score, so it is
/// part of the key alongside the text and job-description prefixes.
fn prediction_key(text: &str, job_description: Option<&str>, industry: Option<&str>) -> String {
    format!(
        "{}_{}",
        PredictionCache::generate_key(text, job_description),
        industry.unwrap_or("any")
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/predict
///
/// Quick-scan prediction for one résumé. Scores are served from the
/// process-wide cache when the same input was scored within the TTL.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    validate_text("resume_text", &request.resume_text, &state.config)?;
    validate_optional_text(
        "job_description",
        request.job_description.as_deref(),
        &state.config,
    )?;

    let text = request.resume_text.as_str();
    let job_description = non_blank(request.job_description.as_deref());
    let industry = resolve_industry(request.industry.as_deref(), &state, Some(text));

    let features = extract_features_optimized(text, job_description, None);
    let key = prediction_key(text, job_description, industry.as_deref());
    let (score, cached) = state.cache.get_or_compute(&key, || {
        predict_score_optimized(&features, &state.weights, industry.as_deref())
    });
    debug!(score, cached, industry = ?industry, "prediction served");

    Ok(Json(PredictResponse {
        score,
        cached,
        keyword_hits: keyword_hits(text, job_description),
        industry,
        features,
    }))
}

/// POST /api/v1/predict/batch
///
/// Scores every résumé against one job description and industry. Feature
/// extraction shares one memo for the request, so repeated résumés are
/// extracted once.
pub async fn handle_batch_predict(
    State(state): State<AppState>,
    Json(request): Json<BatchPredictRequest>,
) -> Result<Json<BatchPredictResponse>, AppError> {
    validate_batch_size(request.items.len(), &state.config)?;
    for item in &request.items {
        validate_text("resume_text", &item.resume_text, &state.config)?;
    }
    validate_optional_text(
        "job_description",
        request.job_description.as_deref(),
        &state.config,
    )?;

    let job_description = non_blank(request.job_description.as_deref());
    let industry = resolve_industry(request.industry.as_deref(), &state, None);

    let mut memo = FeatureMemo::new();
    let features: Vec<FeatureSet> = request
        .items
        .iter()
        .map(|item| extract_features_optimized(&item.resume_text, job_description, Some(&mut memo)))
        .collect();
    info!(
        items = features.len(),
        distinct = memo.len(),
        "batch prediction"
    );

    let scores = batch_predict_optimized(&features, &state.weights, industry.as_deref());

    Ok(Json(BatchPredictResponse { scores, industry }))
}

/// GET /api/v1/cache/stats
pub async fn handle_cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse {
        stats: state.cache.stats(),
    })
}

/// DELETE /api/v1/cache
pub async fn handle_clear_cache(State(state): State<AppState>) -> StatusCode {
    state.cache.clear();
    info!("prediction cache cleared");
    StatusCode::NO_CONTENT
}
