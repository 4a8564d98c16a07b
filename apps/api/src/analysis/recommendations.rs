//! Recommendation Generator: fixed-threshold findings, ranked by impact.
//!
//! The returned list is final: sorted by descending impact and capped at
//! [`MAX_RECOMMENDATIONS`]. Callers display it as-is.

use serde::{Deserialize, Serialize};

use crate::analysis::entities::EntityBundle;
use crate::analysis::scorer::ScoreBundle;
use crate::analysis::verbs::{ActionVerb, WEAK_STRENGTH_THRESHOLD};
use crate::analysis::weak_phrases::WeakPhrase;

pub const MAX_RECOMMENDATIONS: usize = 5;

const LOW_KEYWORD_MATCH: u32 = 40;
const MAX_WEAK_VERBS: usize = 3;
const LOW_STRUCTURE: u32 = 60;
const MIN_SKILLS: usize = 5;
const LOW_SENTIMENT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Critical,
    Important,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub impact: u32,
}

/// Everything the generator looks at, borrowed from one analysis run.
pub struct RecommendationInputs<'a> {
    pub scores: &'a ScoreBundle,
    pub action_verbs: &'a [ActionVerb],
    pub weak_phrases: &'a [WeakPhrase],
    pub missing_keywords: &'a [String],
    pub entities: &'a EntityBundle,
}

pub fn generate_recommendations(inputs: &RecommendationInputs<'_>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if inputs.scores.keyword_match < LOW_KEYWORD_MATCH {
        let examples: Vec<&str> = inputs
            .missing_keywords
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        recommendations.push(Recommendation {
            kind: RecommendationKind::Critical,
            title: "Low Keyword Match".to_string(),
            description: format!(
                "Your resume matches only {}% of job requirements. Add missing keywords: {}",
                inputs.scores.keyword_match,
                examples.join(", ")
            ),
            impact: 25,
        });
    }

    let weak_verbs = inputs
        .action_verbs
        .iter()
        .filter(|v| v.strength < WEAK_STRENGTH_THRESHOLD)
        .count();
    if weak_verbs > MAX_WEAK_VERBS {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Critical,
            title: "Replace Weak Action Verbs".to_string(),
            description: format!(
                "Found {weak_verbs} weak verbs. Use strong action verbs like: Achieved, Led, Delivered, Optimized"
            ),
            impact: 20,
        });
    }

    if inputs.scores.structure_score < LOW_STRUCTURE {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Important,
            title: "Add Quantifiable Metrics".to_string(),
            description: "Include numbers, percentages, and measurable outcomes (e.g., \"Increased revenue by 40%\", \"Led team of 8\")".to_string(),
            impact: 18,
        });
    }

    if let Some(first) = inputs.weak_phrases.first() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Important,
            title: format!("Remove {} Weak Phrases", inputs.weak_phrases.len()),
            description: format!(
                "Replace passive phrases like \"{}\" with stronger alternatives",
                first.phrase
            ),
            impact: 15,
        });
    }

    if inputs.entities.skills.len() < MIN_SKILLS {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Suggestion,
            title: "Expand Technical Skills".to_string(),
            description: "Add more specific technologies and frameworks relevant to the role"
                .to_string(),
            impact: 10,
        });
    }

    if inputs.scores.sentiment_score < LOW_SENTIMENT {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Suggestion,
            title: "Use More Impact-Oriented Language".to_string(),
            description: "Focus on achievements and positive outcomes rather than tasks"
                .to_string(),
            impact: 12,
        });
    }

    // stable: equal impacts keep trigger order
    recommendations.sort_by(|a, b| b.impact.cmp(&a.impact));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
