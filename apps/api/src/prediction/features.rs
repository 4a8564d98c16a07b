//! Optimized feature extraction: regex and substring checks only, no tokenizer,
//! no vocabulary. Used by the quick-scan prediction path.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_EXPERIENCE_YEARS: u32 = 20;
pub const MAX_ACTION_VERB_COUNT: u32 = 30;
pub const MAX_TECHNICAL_SKILL_COUNT: u32 = 25;

/// Assumed years of experience when the text states none.
const DEFAULT_EXPERIENCE_YEARS: u32 = 2;
/// Keyword density when there is no job description to compare against.
const NEUTRAL_KEYWORD_DENSITY: f64 = 0.5;
const DEFAULT_INDUSTRY_MATCH: f64 = 0.3;

const MEMO_TEXT_PREFIX: usize = 100;
const MEMO_REFERENCE_PREFIX: usize = 50;

/// Industries and the substrings that identify them, checked in order.
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("technology", &["software", "developer", "engineer", "programming", "code"]),
    ("finance", &["financial", "accounting", "investment", "banking"]),
    ("healthcare", &["medical", "healthcare", "clinical", "patient"]),
    ("sales", &["sales", "business development", "account", "revenue"]),
    ("marketing", &["marketing", "campaign", "brand", "content"]),
];

macro_rules! feature_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

feature_pattern!(RE_PHONE, r"\d{3}[-.]?\d{3}[-.]?\d{4}");
feature_pattern!(RE_EDUCATION_FORMAT, r"(?i)education|degree|university|college");
feature_pattern!(RE_EXPERIENCE_FORMAT, r"(?i)experience|work|employment");
feature_pattern!(RE_CONTACT, r"(?i)email|phone|linkedin");
feature_pattern!(RE_EDUCATION, r"(?i)education|degree|university");
feature_pattern!(RE_EXPERIENCE, r"(?i)experience|work|job|position");
feature_pattern!(RE_SKILLS, r"(?i)skills?|proficient|technologies");
feature_pattern!(RE_TABLES, r"(?i)<table|<td|<tr");
feature_pattern!(RE_IMAGES, r"(?i)<img|image");
feature_pattern!(
    RE_YEARS,
    r"(?i)(\d+)\+?\s*(?:years?|yrs?)\s*(?:of)?\s*(?:experience)?"
);
feature_pattern!(RE_PHD, r"(?i)phd|doctorate");
feature_pattern!(RE_MASTERS, r"(?i)master|mba");
feature_pattern!(RE_BACHELORS, r"(?i)bachelor|degree");
feature_pattern!(RE_ASSOCIATE, r"(?i)associate|diploma");
feature_pattern!(
    RE_METRICS,
    r"(?i)\d+%|\$\d+[kmb]?|\d+x|increase|improve|reduce|grow"
);
feature_pattern!(
    RE_ACTION_VERBS,
    r"(?i)\b(led|managed|developed|created|implemented|designed|improved|increased|reduced|achieved|delivered|launched|built|optimized|streamlined|coordinated)\b"
);
feature_pattern!(
    RE_TECH_SKILLS,
    r"(?i)\b(javascript|python|java|react|node|sql|aws|docker|kubernetes|git|api|database|cloud|agile|scrum|ci/cd|typescript|angular|vue)\b"
);

fn is_match(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

fn count_matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> u32 {
    pattern
        .as_ref()
        .map_or(0, |re| re.find_iter(text).count() as u32)
}

fn points(present: bool, value: f64) -> f64 {
    if present {
        value
    } else {
        0.0
    }
}

/// The ten-feature vector consumed by the prediction engine.
/// Ratios are in [0, 1]; counts and ordinals carry their own bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub keyword_density: f64,
    pub format_score: f64,
    pub completeness_score: f64,
    pub industry_match_score: f64,
    pub ats_compatibility_score: f64,
    /// 0-20
    pub experience_years: u32,
    /// 1 (none)-5 (doctorate)
    pub education_level: u8,
    pub has_metrics: bool,
    /// 0-30
    pub action_verb_count: u32,
    /// 0-25
    pub technical_skill_count: u32,
}

/// Caller-owned memo of extracted features.
///
/// Keys use only a prefix of each input, so long documents that share their
/// first 100 characters (and JD prefix) share an entry.
pub type FeatureMemo = HashMap<String, FeatureSet>;

fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn memo_key(text: &str, reference: Option<&str>) -> String {
    let reference = reference
        .filter(|r| !r.is_empty())
        .map(|r| prefix(r, MEMO_REFERENCE_PREFIX))
        .unwrap_or("no-jd");
    format!("{}_{}", prefix(text, MEMO_TEXT_PREFIX), reference)
}

/// First industry whose keyword list hits `text`, with the number of hits.
pub fn detect_industry(text: &str) -> Option<(&'static str, usize)> {
    let lowered = text.to_lowercase();
    INDUSTRY_KEYWORDS.iter().find_map(|(industry, terms)| {
        let hits = terms.iter().filter(|t| lowered.contains(*t)).count();
        (hits > 0).then_some((*industry, hits))
    })
}

/// Extracts the feature vector, consulting and filling `memo` when given.
pub fn extract_features_optimized(
    text: &str,
    reference: Option<&str>,
    memo: Option<&mut FeatureMemo>,
) -> FeatureSet {
    match memo {
        Some(memo) => {
            let key = memo_key(text, reference);
            if let Some(cached) = memo.get(&key) {
                return cached.clone();
            }
            let features = compute_features(text, reference);
            memo.insert(key, features.clone());
            features
        }
        None => compute_features(text, reference),
    }
}

fn compute_features(text: &str, reference: Option<&str>) -> FeatureSet {
    let lowered = text.to_lowercase();

    let keyword_density = {
        let keywords: Vec<String> = reference
            .map(|r| {
                r.to_lowercase()
                    .split_whitespace()
                    .filter(|w| w.chars().count() > 3)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if keywords.is_empty() {
            NEUTRAL_KEYWORD_DENSITY
        } else {
            let hits = keywords.iter().filter(|k| lowered.contains(k.as_str())).count();
            hits as f64 / keywords.len() as f64
        }
    };

    let format_score = 0.5
        + points(text.contains('@'), 0.1)
        + points(is_match(&RE_PHONE, text), 0.1)
        + points(is_match(&RE_EDUCATION_FORMAT, text), 0.15)
        + points(is_match(&RE_EXPERIENCE_FORMAT, text), 0.15);

    let completeness_score = [&RE_CONTACT, &RE_EDUCATION, &RE_EXPERIENCE, &RE_SKILLS]
        .into_iter()
        .filter(|re| is_match(re, text))
        .count() as f64
        * 0.25;

    let industry_match_score = detect_industry(text)
        .map(|(_, hits)| (0.5 + hits as f64 * 0.15).min(1.0))
        .unwrap_or(DEFAULT_INDUSTRY_MATCH);

    let ats_compatibility_score = 1.0
        - points(!text.is_ascii(), 0.2)
        - points(is_match(&RE_TABLES, text), 0.3)
        - points(is_match(&RE_IMAGES, text), 0.1);

    let experience_years = RE_YEARS
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<u32>().unwrap_or(MAX_EXPERIENCE_YEARS))
        .unwrap_or(DEFAULT_EXPERIENCE_YEARS);

    let education_level = if is_match(&RE_PHD, text) {
        5
    } else if is_match(&RE_MASTERS, text) {
        4
    } else if is_match(&RE_BACHELORS, text) {
        3
    } else if is_match(&RE_ASSOCIATE, text) {
        2
    } else {
        1
    };

    FeatureSet {
        keyword_density: keyword_density.min(1.0),
        format_score: format_score.min(1.0),
        completeness_score,
        industry_match_score,
        ats_compatibility_score: ats_compatibility_score.clamp(0.0, 1.0),
        experience_years: experience_years.min(MAX_EXPERIENCE_YEARS),
        education_level,
        has_metrics: is_match(&RE_METRICS, text),
        action_verb_count: count_matches(&RE_ACTION_VERBS, text).min(MAX_ACTION_VERB_COUNT),
        technical_skill_count: count_matches(&RE_TECH_SKILLS, text)
            .min(MAX_TECHNICAL_SKILL_COUNT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe | jane@example.com | 555-123-4567 | linkedin.com/in/jane\n\
        Experience: 7 years of experience as a software engineer.\n\
        Led migration to Kubernetes, reduced costs 30%, built Python and Docker tooling.\n\
        Education: Master of Science, State University.\n\
        Skills: Python, AWS, Docker, Kubernetes, SQL";

    fn assert_bounded(f: &FeatureSet) {
        for ratio in [
            f.keyword_density,
            f.format_score,
            f.completeness_score,
            f.industry_match_score,
            f.ats_compatibility_score,
        ] {
            assert!((0.0..=1.0).contains(&ratio), "ratio out of range: {ratio}");
        }
        assert!(f.experience_years <= MAX_EXPERIENCE_YEARS);
        assert!((1..=5).contains(&f.education_level));
        assert!(f.action_verb_count <= MAX_ACTION_VERB_COUNT);
        assert!(f.technical_skill_count <= MAX_TECHNICAL_SKILL_COUNT);
    }

    #[test]
    fn test_well_formed_resume_features() {
        let f = extract_features_optimized(RESUME, Some("Senior Python engineer Kubernetes Docker"), None);
        assert_bounded(&f);
        assert_eq!(f.format_score, 1.0);
        assert_eq!(f.completeness_score, 1.0);
        assert_eq!(f.experience_years, 7);
        assert_eq!(f.education_level, 4);
        assert!(f.has_metrics);
        assert!(f.action_verb_count >= 3);
        assert!(f.technical_skill_count >= 5);
        // every JD word but "senior" appears in the text
        assert!((f.keyword_density - 0.8).abs() < 1e-12);
        assert_eq!(f.ats_compatibility_score, 1.0);
    }

    #[test]
    fn test_empty_text_defaults() {
        let f = extract_features_optimized("", None, None);
        assert_bounded(&f);
        assert_eq!(f.keyword_density, 0.5);
        assert_eq!(f.format_score, 0.5);
        assert_eq!(f.completeness_score, 0.0);
        assert_eq!(f.industry_match_score, 0.3);
        assert_eq!(f.experience_years, 2);
        assert_eq!(f.education_level, 1);
        assert!(!f.has_metrics);
    }

    #[test]
    fn test_experience_years_capped() {
        let f = extract_features_optimized("45 years of experience", None, None);
        assert_eq!(f.experience_years, MAX_EXPERIENCE_YEARS);
        let f = extract_features_optimized("99999999999999 yrs", None, None);
        assert_eq!(f.experience_years, MAX_EXPERIENCE_YEARS);
    }

    #[test]
    fn test_ats_penalties() {
        let f = extract_features_optimized("Résumé <table><img src=x>", None, None);
        // non-ascii 0.2 + table 0.3 + image 0.1
        assert!((f.ats_compatibility_score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_detect_industry_first_match_wins() {
        assert_eq!(detect_industry("software developer in banking"), Some(("technology", 2)));
        assert_eq!(detect_industry("clinical patient care"), Some(("healthcare", 2)));
        assert_eq!(detect_industry("gardening"), None);
    }

    #[test]
    fn test_memo_is_consulted_and_filled() {
        let mut memo = FeatureMemo::new();
        let first = extract_features_optimized(RESUME, None, Some(&mut memo));
        assert_eq!(memo.len(), 1);
        let second = extract_features_optimized(RESUME, None, Some(&mut memo));
        assert_eq!(first, second);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_memo_key_collides_on_shared_prefix() {
        let base = "x".repeat(100);
        let a = format!("{base} PhD in physics");
        let b = format!("{base} no degree at all");
        assert_eq!(memo_key(&a, None), memo_key(&b, None));

        let mut memo = FeatureMemo::new();
        let fa = extract_features_optimized(&a, None, Some(&mut memo));
        let fb = extract_features_optimized(&b, None, Some(&mut memo));
        assert_eq!(fa, fb);
        assert_eq!(fa.education_level, 5);
    }

    #[test]
    fn test_memo_key_prefixes_are_char_safe() {
        let text = "é".repeat(150);
        let key = memo_key(&text, Some(""));
        assert_eq!(key, format!("{}_no-jd", "é".repeat(100)));
    }
}
