//! Prediction engine: a caller-weighted linear model over a [`FeatureSet`].
//!
//! A cheap quick-score over three features short-circuits obviously weak
//! input; only the remaining cases consult the full weight vector.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prediction::features::FeatureSet;

/// Quick-scores below this are returned as-is.
pub const EARLY_EXIT_THRESHOLD: f64 = 20.0;

/// Inputs per chunk in [`batch_predict_optimized`].
pub const BATCH_CHUNK_SIZE: usize = 10;

/// Externally supplied linear weights. Missing keys weigh 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictionWeights {
    pub bias: f64,
    pub keyword_density: f64,
    pub format_score: f64,
    pub completeness_score: f64,
    pub industry_match: f64,
    pub ats_compatibility: f64,
    pub experience_years: f64,
    pub education_level: f64,
    pub has_metrics: f64,
    pub action_verbs: f64,
    pub technical_skills: f64,
    /// Per-industry multiplier applied to the linear sum.
    pub industry_weights: HashMap<String, f64>,
}

impl PredictionWeights {
    /// The baseline weights used when no weight file is configured.
    pub fn baseline() -> Self {
        Self {
            bias: 0.5,
            keyword_density: 0.25,
            format_score: 0.20,
            completeness_score: 0.15,
            industry_match: 0.12,
            ats_compatibility: 0.18,
            experience_years: 0.05,
            education_level: 0.03,
            has_metrics: 0.08,
            action_verbs: 0.06,
            technical_skills: 0.07,
            industry_weights: [
                ("technology", 1.1),
                ("healthcare", 1.05),
                ("finance", 1.08),
                ("sales", 0.95),
                ("marketing", 0.98),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        }
    }

    /// Multiplier for `industry`; unknown industries and a zero entry both mean 1.0.
    pub fn industry_multiplier(&self, industry: Option<&str>) -> f64 {
        industry
            .and_then(|name| self.industry_weights.get(name))
            .copied()
            .filter(|m| *m != 0.0 && m.is_finite())
            .unwrap_or(1.0)
    }
}

/// keyword·30 + format·20 + completeness·20, in [0, 70].
pub fn quick_score(features: &FeatureSet) -> f64 {
    features.keyword_density * 30.0
        + features.format_score * 20.0
        + features.completeness_score * 20.0
}

/// Predicts a 0-100 score. Returns the quick-score unchanged when it is below
/// [`EARLY_EXIT_THRESHOLD`], without reading `weights`.
pub fn predict_score_optimized(
    features: &FeatureSet,
    weights: &PredictionWeights,
    industry: Option<&str>,
) -> f64 {
    let quick = quick_score(features);
    if quick < EARLY_EXIT_THRESHOLD {
        debug!(quick_score = quick, "early exit on low quick-score");
        return quick;
    }

    let metrics = if features.has_metrics { 1.0 } else { 0.0 };
    let score = weights.bias
        + weights.keyword_density * features.keyword_density
        + weights.format_score * features.format_score
        + weights.completeness_score * features.completeness_score
        + weights.industry_match * features.industry_match_score
        + weights.ats_compatibility * features.ats_compatibility_score
        + weights.experience_years * (features.experience_years as f64 / 10.0)
        + weights.education_level * (features.education_level as f64 / 5.0)
        + weights.has_metrics * metrics
        + weights.action_verbs * (features.action_verb_count as f64 / 20.0)
        + weights.technical_skills * (features.technical_skill_count as f64 / 15.0);

    let scaled = score * weights.industry_multiplier(industry) * 100.0;
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, 100.0)
}

/// Scores every feature set in input order, walking the input in fixed-size chunks.
pub fn batch_predict_optimized(
    features: &[FeatureSet],
    weights: &PredictionWeights,
    industry: Option<&str>,
) -> Vec<f64> {
    let mut results = Vec::with_capacity(features.len());
    for chunk in features.chunks(BATCH_CHUNK_SIZE) {
        results.extend(
            chunk
                .iter()
                .map(|f| predict_score_optimized(f, weights, industry)),
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(keyword: f64, format: f64, completeness: f64) -> FeatureSet {
        FeatureSet {
            keyword_density: keyword,
            format_score: format,
            completeness_score: completeness,
            industry_match_score: 0.8,
            ats_compatibility_score: 1.0,
            experience_years: 5,
            education_level: 3,
            has_metrics: true,
            action_verb_count: 10,
            technical_skill_count: 15,
        }
    }

    #[test]
    fn test_early_exit_ignores_weights() {
        // 0.0*30 + 0.5*20 + 0.0*20 = 10
        let f = features(0.0, 0.5, 0.0);
        let explosive = PredictionWeights {
            technical_skills: 1.0e9,
            ..PredictionWeights::default()
        };
        assert_eq!(predict_score_optimized(&f, &explosive, None), 10.0);
    }

    #[test]
    fn test_full_path_is_clamped() {
        let f = features(1.0, 1.0, 1.0);
        let explosive = PredictionWeights {
            technical_skills: 1.0e9,
            ..PredictionWeights::default()
        };
        assert_eq!(predict_score_optimized(&f, &explosive, None), 100.0);

        let negative = PredictionWeights {
            bias: -50.0,
            ..PredictionWeights::default()
        };
        assert_eq!(predict_score_optimized(&f, &negative, None), 0.0);
    }

    #[test]
    fn test_linear_sum() {
        let f = features(1.0, 1.0, 1.0);
        let weights = PredictionWeights {
            bias: 0.1,
            keyword_density: 0.2,
            technical_skills: 0.15,
            ..PredictionWeights::default()
        };
        // 0.1 + 0.2*1.0 + 0.15*(15/15) = 0.45 → 45
        let score = predict_score_optimized(&f, &weights, None);
        assert!((score - 45.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_industry_multiplier() {
        let f = features(1.0, 1.0, 1.0);
        let mut weights = PredictionWeights {
            bias: 0.4,
            ..PredictionWeights::default()
        };
        weights.industry_weights.insert("finance".to_string(), 1.5);
        weights.industry_weights.insert("void".to_string(), 0.0);

        let base = predict_score_optimized(&f, &weights, None);
        assert!((base - 40.0).abs() < 1e-9);
        let finance = predict_score_optimized(&f, &weights, Some("finance"));
        assert!((finance - 60.0).abs() < 1e-9);
        assert_eq!(weights.industry_multiplier(Some("void")), 1.0);
        assert_eq!(weights.industry_multiplier(Some("unknown")), 1.0);
    }

    #[test]
    fn test_weights_deserialize_from_camel_case() {
        let json = r#"{
            "bias": 0.2,
            "keywordDensity": 0.3,
            "atsCompatibility": 0.1,
            "industryWeights": { "technology": 1.2 }
        }"#;
        let weights: PredictionWeights = serde_json::from_str(json).unwrap();
        assert_eq!(weights.bias, 0.2);
        assert_eq!(weights.keyword_density, 0.3);
        assert_eq!(weights.ats_compatibility, 0.1);
        assert_eq!(weights.technical_skills, 0.0);
        assert_eq!(weights.industry_multiplier(Some("technology")), 1.2);
    }

    #[test]
    fn test_baseline_scores_are_bounded() {
        let weights = PredictionWeights::baseline();
        for f in [features(1.0, 1.0, 1.0), features(0.5, 0.6, 0.25), features(0.0, 0.5, 0.0)] {
            let score = predict_score_optimized(&f, &weights, Some("technology"));
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn test_batch_preserves_order_across_chunks() {
        let weights = PredictionWeights {
            bias: 0.1,
            ..PredictionWeights::default()
        };
        let inputs: Vec<FeatureSet> = (0..25)
            .map(|i| {
                if i % 2 == 0 {
                    features(0.0, 0.5, 0.0)
                } else {
                    features(1.0, 1.0, 1.0)
                }
            })
            .collect();

        let scores = batch_predict_optimized(&inputs, &weights, None);
        assert_eq!(scores.len(), 25);
        for (i, score) in scores.iter().enumerate() {
            let expected = predict_score_optimized(&inputs[i], &weights, None);
            assert_eq!(*score, expected, "mismatch at index {i}");
        }
        assert!(batch_predict_optimized(&[], &weights, None).is_empty());
    }
}
