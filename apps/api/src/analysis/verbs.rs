//! Action-verb detection: looks at the opening words of each sentence.

use serde::{Deserialize, Serialize};

/// Verbs that open strong, ownership-led bullets.
pub const STRONG_VERBS: &[(&str, f64)] = &[
    ("achieved", 0.95),
    ("delivered", 0.90),
    ("led", 0.95),
    ("spearheaded", 0.98),
    ("architected", 0.92),
    ("engineered", 0.88),
    ("optimized", 0.85),
    ("transformed", 0.93),
    ("pioneered", 0.96),
    ("launched", 0.87),
    ("drove", 0.90),
    ("executed", 0.85),
    ("implemented", 0.80),
    ("developed", 0.75),
    ("created", 0.75),
    ("built", 0.78),
    ("designed", 0.80),
    ("established", 0.82),
    ("improved", 0.75),
    ("increased", 0.78),
];

/// Verbs that signal a supporting or passive role.
pub const WEAK_VERBS: &[(&str, f64)] = &[
    ("helped", 0.30),
    ("assisted", 0.35),
    ("worked", 0.25),
    ("responsible", 0.20),
    ("participated", 0.30),
    ("involved", 0.25),
    ("contributed", 0.40),
    ("supported", 0.35),
];

/// Only this many leading words of a sentence are inspected.
const LEADING_WORDS: usize = 3;

/// Strength below which a verb counts as weak for recommendations.
pub const WEAK_STRENGTH_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionVerb {
    pub verb: String,
    /// 0.0-1.0
    pub strength: f64,
}

fn verb_strength(word: &str) -> Option<f64> {
    STRONG_VERBS
        .iter()
        .chain(WEAK_VERBS.iter())
        .find(|(verb, _)| *verb == word)
        .map(|(_, strength)| *strength)
}

/// Every strong or weak verb among the first three words of each sentence.
/// Sentences split on `.`, `!` and `?`; a verb is recorded once per occurrence.
pub fn detect_action_verbs(text: &str) -> Vec<ActionVerb> {
    let mut detected = Vec::new();
    for sentence in text.split(['.', '!', '?']) {
        let lowered = sentence.trim().to_lowercase();
        for word in lowered.split_whitespace().take(LEADING_WORDS) {
            if let Some(strength) = verb_strength(word) {
                detected.push(ActionVerb {
                    verb: word.to_string(),
                    strength,
                });
            }
        }
    }
    detected
}

/// Mean strength of `verbs`, or `None` when nothing was detected.
pub fn average_strength(verbs: &[ActionVerb]) -> Option<f64> {
    if verbs.is_empty() {
        return None;
    }
    Some(verbs.iter().map(|v| v.strength).sum::<f64>() / verbs.len() as f64)
}
