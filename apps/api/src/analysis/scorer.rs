//! Scorer: combines TF-IDF similarity and the lexical detectors into a Score Bundle.
//!
//! Overall = 0.40·keyword + 0.25·action_verb + 0.15·sentiment + 0.20·structure,
//! taken over the unrounded sub-scores and rounded once.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::sentiment::analyze_sentiment;
use crate::analysis::similarity::cosine_similarity;
use crate::analysis::tfidf::TfIdfModel;
use crate::analysis::verbs::{average_strength, detect_action_verbs};

pub const KEYWORD_WEIGHT: f64 = 0.40;
pub const ACTION_VERB_WEIGHT: f64 = 0.25;
pub const SENTIMENT_WEIGHT: f64 = 0.15;
pub const STRUCTURE_WEIGHT: f64 = 0.20;

/// Assumed verb strength when no action verb is found.
const DEFAULT_VERB_STRENGTH: f64 = 0.5;

const SECTION_POINTS: u32 = 40;
const BULLET_POINTS: u32 = 30;
const METRIC_POINTS: u32 = 30;

static SECTION_HEADER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)experience|education|skills|projects").ok());
static BULLET_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[•\-*]").ok());
static NUMBERED_LIST: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?m)^\d+\.").ok());
static METRIC: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\d+%|\$\d+|\d+[kmb]\+?").ok());

fn is_match(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Five integer scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub overall_score: u32,
    pub keyword_match: u32,
    pub action_verb_score: u32,
    pub sentiment_score: u32,
    pub structure_score: u32,
}

fn to_percent(value: f64) -> u32 {
    value.clamp(0.0, 100.0).round() as u32
}

/// Structure points: section headers (40), bullets or numbered list (30), metrics (30).
/// Always one of {0, 30, 40, 60, 70, 100}.
pub fn structure_score(text: &str) -> u32 {
    let has_sections = is_match(&SECTION_HEADER, text);
    let has_bullets = is_match(&BULLET_MARKER, text) || is_match(&NUMBERED_LIST, text);
    let has_metrics = is_match(&METRIC, text);

    [
        (has_sections, SECTION_POINTS),
        (has_bullets, BULLET_POINTS),
        (has_metrics, METRIC_POINTS),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum()
}

/// Keyword-match percentage between `resume_text` and `reference_text`, unrounded.
pub fn keyword_match(resume_text: &str, reference_text: &str) -> f64 {
    let model = TfIdfModel::new(&[resume_text, reference_text]);
    let resume_vector = model.tfidf(resume_text);
    let reference_vector = model.tfidf(reference_text);
    (cosine_similarity(&resume_vector, &reference_vector) * 100.0).clamp(0.0, 100.0)
}

/// Scores `resume_text` against `reference_text`. Pure: equal inputs give equal bundles.
pub fn score_resume(resume_text: &str, reference_text: &str) -> ScoreBundle {
    let keyword = keyword_match(resume_text, reference_text);

    let verbs = detect_action_verbs(resume_text);
    let action_verb = average_strength(&verbs).unwrap_or(DEFAULT_VERB_STRENGTH) * 100.0;

    let sentiment = analyze_sentiment(resume_text);
    let sentiment_pct = (sentiment.score + 1.0) / 2.0 * 100.0;

    let structure = structure_score(resume_text) as f64;

    let overall = keyword * KEYWORD_WEIGHT
        + action_verb * ACTION_VERB_WEIGHT
        + sentiment_pct * SENTIMENT_WEIGHT
        + structure * STRUCTURE_WEIGHT;

    ScoreBundle {
        overall_score: to_percent(overall),
        keyword_match: to_percent(keyword),
        action_verb_score: to_percent(action_verb),
        sentiment_score: to_percent(sentiment_pct),
        structure_score: to_percent(structure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Experience\n\
        - Led a team of 8 engineers building Rust microservices.\n\
        - Increased revenue by 40% through pricing experiments.\n\
        Skills: Rust, Kubernetes, PostgreSQL, Terraform, Python.";

    const JD: &str = "We are hiring a senior Rust engineer to build microservices on \
        Kubernetes with PostgreSQL. Terraform experience is a plus.";

    fn assert_bounded(bundle: &ScoreBundle) {
        for value in [
            bundle.overall_score,
            bundle.keyword_match,
            bundle.action_verb_score,
            bundle.sentiment_score,
            bundle.structure_score,
        ] {
            assert!(value <= 100, "score out of range: {value}");
        }
    }

    #[test]
    fn test_identical_documents_match_fully() {
        let bundle = score_resume(JD, JD);
        assert_eq!(bundle.keyword_match, 100);
    }

    #[test]
    fn test_structure_full_marks() {
        let text = "Skills\n• increased revenue by 40% and led a team of 8";
        assert_eq!(structure_score(text), 100);
    }

    #[test]
    fn test_structure_is_discrete() {
        assert_eq!(structure_score("plain prose only"), 0);
        assert_eq!(structure_score("Education at State"), 40);
        assert_eq!(structure_score("1. first item"), 30);
        assert_eq!(structure_score("grew sales 25%"), 30);
        assert_eq!(structure_score("Projects\n1. first"), 70);
        assert_eq!(structure_score("Projects: cut costs 10%"), 70);
        assert_eq!(structure_score("1. grew 3x to $500"), 60);
    }

    #[test]
    fn test_default_verb_strength_when_none_found() {
        let bundle = score_resume("nothing notable here at all", JD);
        assert_eq!(bundle.action_verb_score, 50);
    }

    #[test]
    fn test_overall_uses_unrounded_subscores() {
        let bundle = score_resume(RESUME, JD);
        assert_bounded(&bundle);

        let keyword = keyword_match(RESUME, JD);
        let verbs = detect_action_verbs(RESUME);
        let verb = average_strength(&verbs).unwrap_or(0.5) * 100.0;
        let sentiment = (analyze_sentiment(RESUME).score + 1.0) / 2.0 * 100.0;
        let structure = structure_score(RESUME) as f64;
        let expected = (keyword * 0.40 + verb * 0.25 + sentiment * 0.15 + structure * 0.20).round();
        assert_eq!(bundle.overall_score, expected as u32);

        let from_rounded = bundle.keyword_match as f64 * 0.40
            + bundle.action_verb_score as f64 * 0.25
            + bundle.sentiment_score as f64 * 0.15
            + bundle.structure_score as f64 * 0.20;
        assert!((bundle.overall_score as f64 - from_rounded).abs() <= 1.0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        assert_eq!(score_resume(RESUME, JD), score_resume(RESUME, JD));
    }

    #[test]
    fn test_empty_inputs_are_bounded() {
        let bundle = score_resume("", "");
        assert_bounded(&bundle);
        assert_eq!(bundle.keyword_match, 0);
        assert_eq!(bundle.structure_score, 0);
        assert_eq!(bundle.sentiment_score, 50);
    }
}
