//! Resume analyzer: pluggable, trait-based full analysis of a résumé against a JD.
//!
//! Default: `TfIdfAnalyzer` (pure-Rust, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>` so handlers and the batch
//! runner never name the concrete backend.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::entities::{extract_entities, EntityBundle};
use crate::analysis::recommendations::{
    generate_recommendations, Recommendation, RecommendationInputs,
};
use crate::analysis::scorer::{score_resume, ScoreBundle};
use crate::analysis::sentiment::{analyze_sentiment, Sentiment};
use crate::analysis::tfidf::{KeywordScore, TfIdfModel};
use crate::analysis::tokenizer::tokenize;
use crate::analysis::verbs::{detect_action_verbs, ActionVerb};
use crate::analysis::weak_phrases::{detect_weak_phrases, WeakPhrase};
use crate::errors::AppError;

/// Résumés shorter than this (in chars) get the empty report.
pub const MIN_RESUME_CHARS: usize = 100;

/// Scoring reference when no job description is supplied.
pub const DEFAULT_SCORING_REFERENCE: &str = "software engineer full stack development";

/// Keyword-extraction reference when no job description is supplied.
pub const DEFAULT_KEYWORD_REFERENCE: &str =
    "software engineer full stack web development python javascript react node";

const TOP_KEYWORDS: usize = 15;
const MAX_MATCHED_KEYWORDS: usize = 20;
const MAX_MISSING_KEYWORDS: usize = 15;
const MAX_ACTION_VERBS: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Full analysis handed to the UI and, as an opaque payload, to persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub scores: ScoreBundle,
    pub top_keywords: Vec<KeywordScore>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub action_verbs: Vec<ActionVerb>,
    pub weak_phrases: Vec<WeakPhrase>,
    pub sentiment: Sentiment,
    pub entities: EntityBundle,
    pub recommendations: Vec<Recommendation>,
    pub analyzer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisReport, AppError>;
}

/// TF-IDF + lexical-detector analyzer.
///
/// The analysis is CPU-bound, so it runs on the blocking pool rather than the
/// async executor. A panicked or cancelled analysis task surfaces as
/// `AppError::Analysis`.
pub struct TfIdfAnalyzer;

#[async_trait]
impl ResumeAnalyzer for TfIdfAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisReport, AppError> {
        let resume_text = resume_text.to_string();
        let job_description = job_description.map(str::to_string);
        tokio::task::spawn_blocking(move || {
            analyze_resume(&resume_text, job_description.as_deref())
        })
        .await
        .map_err(analysis_task_failed)
    }
}

fn analysis_task_failed(err: tokio::task::JoinError) -> AppError {
    AppError::Analysis(format!("analysis task failed: {err}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Core analysis
// ────────────────────────────────────────────────────────────────────────────

fn empty_report() -> AnalysisReport {
    AnalysisReport {
        analyzer_backend: "tfidf".to_string(),
        ..AnalysisReport::default()
    }
}

pub fn analyze_resume(resume_text: &str, job_description: Option<&str>) -> AnalysisReport {
    if resume_text.chars().count() < MIN_RESUME_CHARS {
        return empty_report();
    }

    let job_description = job_description.filter(|jd| !jd.trim().is_empty());
    let scores = score_resume(
        resume_text,
        job_description.unwrap_or(DEFAULT_SCORING_REFERENCE),
    );

    let keyword_reference = job_description.unwrap_or(DEFAULT_KEYWORD_REFERENCE);
    let model = TfIdfModel::new(&[resume_text, keyword_reference]);
    let top_keywords = model.top_keywords(resume_text, TOP_KEYWORDS);
    let (matched_keywords, missing_keywords) =
        partition_reference_terms(resume_text, keyword_reference);

    let action_verbs = detect_action_verbs(resume_text);
    let weak_phrases = detect_weak_phrases(resume_text);
    let sentiment = analyze_sentiment(resume_text);
    let entities = extract_entities(resume_text);

    let recommendations = generate_recommendations(&RecommendationInputs {
        scores: &scores,
        action_verbs: &action_verbs,
        weak_phrases: &weak_phrases,
        missing_keywords: &missing_keywords,
        entities: &entities,
    });

    AnalysisReport {
        scores,
        top_keywords,
        matched_keywords,
        missing_keywords,
        action_verbs: action_verbs.into_iter().take(MAX_ACTION_VERBS).collect(),
        weak_phrases,
        sentiment,
        entities,
        recommendations,
        analyzer_backend: "tfidf".to_string(),
    }
}

/// Splits the reference's distinct terms into (present in résumé, absent),
/// most frequent reference terms first, ties in first-appearance order.
fn partition_reference_terms(resume_text: &str, reference: &str) -> (Vec<String>, Vec<String>) {
    let resume_terms: HashSet<String> = tokenize(resume_text).into_iter().collect();

    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for token in tokenize(reference) {
        match counts.get_mut(&token) {
            Some(count) => *count += 1,
            None => {
                counts.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }
    let mut ranked: Vec<(String, u32)> = order
        .into_iter()
        .map(|term| {
            let count = counts.get(&term).copied().unwrap_or(0);
            (term, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let (matched, missing): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .map(|(term, _)| term)
        .partition(|term| resume_terms.contains(term));

    (
        matched.into_iter().take(MAX_MATCHED_KEYWORDS).collect(),
        missing.into_iter().take(MAX_MISSING_KEYWORDS).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Experience\n\
        - Responsible for the billing service written in Rust and PostgreSQL.\n\
        - Led a team of 8 engineers and increased revenue by 40%.\n\
        - Built Kubernetes deployment tooling with Terraform and Docker.\n\
        Skills: Rust, Python, Kubernetes, Docker, Terraform, PostgreSQL, AWS";

    const JD: &str = "Senior Rust engineer. Rust services on Kubernetes. Kafka streaming, \
        PostgreSQL, and observability with Grafana.";

    #[test]
    fn test_short_resume_returns_empty_report() {
        let report = analyze_resume("Led a team.", Some(JD));
        assert_eq!(report.scores, ScoreBundle::default());
        assert!(report.top_keywords.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.analyzer_backend, "tfidf");
    }

    #[test]
    fn test_full_report_fields() {
        let report = analyze_resume(RESUME, Some(JD));
        assert!(report.scores.overall_score <= 100);
        assert!(report.top_keywords.len() <= 15);
        assert!(report.entities.skills.contains("rust"));
        assert!(report.entities.companies.is_empty());
        assert_eq!(report.weak_phrases[0].phrase, "responsible for");
        assert!(report.recommendations.len() <= 5);
        assert!(report
            .recommendations
            .windows(2)
            .all(|w| w[0].impact >= w[1].impact));
    }

    #[test]
    fn test_matched_and_missing_keywords() {
        let report = analyze_resume(RESUME, Some(JD));
        // "rust" appears twice in the JD, so it leads the matched list
        assert_eq!(report.matched_keywords[0], "rust");
        assert!(report.matched_keywords.contains(&"kubernetes".to_string()));
        assert!(report.missing_keywords.contains(&"kafka".to_string()));
        assert!(report.missing_keywords.contains(&"grafana".to_string()));
        assert!(!report.missing_keywords.contains(&"rust".to_string()));
    }

    #[test]
    fn test_reference_terms_ranked_by_frequency_then_first_appearance() {
        let resume = "kafka grafana";
        let reference = "grafana terraform kafka kafka ansible terraform kafka";
        let (matched, missing) = partition_reference_terms(resume, reference);
        assert_eq!(matched, vec!["kafka", "grafana"]);
        assert_eq!(missing, vec!["terraform", "ansible"]);
    }

    #[test]
    fn test_large_reference_keeps_every_distinct_term() {
        let reference: Vec<String> = (0..5_000).map(|i| format!("term{i}")).collect();
        let reference = format!("{} {}", reference.join(" "), "term42 term42");
        let (matched, missing) = partition_reference_terms("term42 term7", &reference);
        assert_eq!(matched, vec!["term42", "term7"]);
        assert_eq!(missing.len(), MAX_MISSING_KEYWORDS);
        assert_eq!(missing[0], "term0");
    }

    #[test]
    fn test_blank_job_description_falls_back_to_default_reference() {
        let with_none = analyze_resume(RESUME, None);
        let with_blank = analyze_resume(RESUME, Some("   "));
        assert_eq!(with_none, with_blank);
        assert!(with_none.missing_keywords.contains(&"javascript".to_string()));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        assert_eq!(analyze_resume(RESUME, Some(JD)), analyze_resume(RESUME, Some(JD)));
    }

    #[tokio::test]
    async fn test_failed_analysis_task_maps_to_analysis_error() {
        let join_err = tokio::task::spawn_blocking(|| -> AnalysisReport {
            panic!("detector blew up")
        })
        .await
        .unwrap_err();

        match analysis_task_failed(join_err) {
            AppError::Analysis(msg) => assert!(msg.starts_with("analysis task failed")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tfidf_analyzer_trait_object() {
        let analyzer: Box<dyn ResumeAnalyzer> = Box::new(TfIdfAnalyzer);
        let report = analyzer.analyze(RESUME, Some(JD)).await.unwrap();
        assert_eq!(report, analyze_resume(RESUME, Some(JD)));
    }
}
