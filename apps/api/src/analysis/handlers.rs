//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyzer::{AnalysisReport, DEFAULT_SCORING_REFERENCE};
use crate::analysis::scorer::{score_resume, ScoreBundle};
use crate::errors::AppError;
use crate::prediction::batch::parallel_process;
use crate::routes::validation::{validate_batch_size, validate_optional_text, validate_text};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub report: AnalysisReport,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub scores: ScoreBundle,
}

#[derive(Debug, Deserialize)]
pub struct BatchAnalyzeRequest {
    pub items: Vec<AnalyzeRequest>,
}

/// Aggregate over the overall scores of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStats {
    pub count: usize,
    pub mean_overall: f64,
    pub min_overall: u32,
    pub max_overall: u32,
}

#[derive(Debug, Serialize)]
pub struct BatchAnalyzeResponse {
    /// One report per request item, in request order.
    pub reports: Vec<AnalysisReport>,
    pub stats: BatchStats,
}

fn validate_request(request: &AnalyzeRequest, state: &AppState) -> Result<(), AppError> {
    validate_text("resume_text", &request.resume_text, &state.config)?;
    validate_optional_text(
        "job_description",
        request.job_description.as_deref(),
        &state.config,
    )
}

fn batch_stats(reports: &[AnalysisReport]) -> BatchStats {
    let overall: Vec<u32> = reports.iter().map(|r| r.scores.overall_score).collect();
    let count = overall.len();
    let mean_overall = if count == 0 {
        0.0
    } else {
        overall.iter().map(|s| f64::from(*s)).sum::<f64>() / count as f64
    };
    BatchStats {
        count,
        mean_overall,
        min_overall: overall.iter().copied().min().unwrap_or(0),
        max_overall: overall.iter().copied().max().unwrap_or(0),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Full analysis of one résumé, against the job description when given.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_request(&request, &state)?;

    let report = state
        .analyzer
        .analyze(&request.resume_text, request.job_description.as_deref())
        .await?;

    Ok(Json(AnalyzeResponse { report }))
}

/// POST /api/v1/analysis/score
///
/// Score bundle only. Unlike the full report there is no minimum length.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    validate_request(&request, &state)?;

    let reference = request
        .job_description
        .as_deref()
        .filter(|jd| !jd.trim().is_empty())
        .unwrap_or(DEFAULT_SCORING_REFERENCE);
    let scores = score_resume(&request.resume_text, reference);

    Ok(Json(ScoreResponse { scores }))
}

/// POST /api/v1/analysis/batch
///
/// Analyzes every item through the bounded-concurrency runner. The runner
/// yields completion order; items carry their index so the response can be
/// returned in request order.
pub async fn handle_batch_analyze(
    State(state): State<AppState>,
    Json(request): Json<BatchAnalyzeRequest>,
) -> Result<Json<BatchAnalyzeResponse>, AppError> {
    validate_batch_size(request.items.len(), &state.config)?;
    for item in &request.items {
        validate_request(item, &state)?;
    }

    info!(
        items = request.items.len(),
        concurrency = state.config.batch_concurrency,
        "batch analysis started"
    );

    let indexed: Vec<(usize, AnalyzeRequest)> = request.items.into_iter().enumerate().collect();
    let mut completed = parallel_process(
        indexed,
        |(index, item)| {
            let analyzer = state.analyzer.clone();
            async move {
                let report = analyzer
                    .analyze(&item.resume_text, item.job_description.as_deref())
                    .await?;
                Ok::<_, AppError>((index, report))
            }
        },
        state.config.batch_concurrency,
    )
    .await?;

    completed.sort_by_key(|(index, _)| *index);
    let reports: Vec<AnalysisReport> = completed.into_iter().map(|(_, report)| report).collect();
    let stats = batch_stats(&reports);

    Ok(Json(BatchAnalyzeResponse { reports, stats }))
}
