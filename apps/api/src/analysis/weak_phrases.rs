use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A clichéd passive construction and the verbs that should replace it.
pub struct WeakPhraseRule {
    pub pattern: &'static str,
    pub phrase: &'static str,
    pub suggestion: &'static str,
}

pub const WEAK_PHRASE_RULES: &[WeakPhraseRule] = &[
    WeakPhraseRule {
        pattern: r"\bresponsible for\b",
        phrase: "responsible for",
        suggestion: "Led, Managed, Directed",
    },
    WeakPhraseRule {
        pattern: r"\bhelped (with|to)\b",
        phrase: "helped with/to",
        suggestion: "Drove, Executed, Delivered",
    },
    WeakPhraseRule {
        pattern: r"\bworked on\b",
        phrase: "worked on",
        suggestion: "Developed, Built, Created",
    },
    WeakPhraseRule {
        pattern: r"\bassisted (with|in)\b",
        phrase: "assisted with/in",
        suggestion: "Implemented, Executed",
    },
    WeakPhraseRule {
        pattern: r"\binvolved in\b",
        phrase: "involved in",
        suggestion: "Led, Delivered, Drove",
    },
    WeakPhraseRule {
        pattern: r"\bparticipated in\b",
        phrase: "participated in",
        suggestion: "Contributed, Executed",
    },
];

static COMPILED_RULES: LazyLock<Vec<(&'static WeakPhraseRule, Regex)>> = LazyLock::new(|| {
    WEAK_PHRASE_RULES
        .iter()
        .filter_map(|rule| {
            Regex::new(&format!("(?i){}", rule.pattern))
                .ok()
                .map(|re| (rule, re))
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakPhrase {
    pub phrase: String,
    pub suggestion: String,
}

/// One finding per matching rule, however many times the phrase occurs.
pub fn detect_weak_phrases(text: &str) -> Vec<WeakPhrase> {
    COMPILED_RULES
        .iter()
        .filter(|(_, regex)| regex.is_match(text))
        .map(|(rule, _)| WeakPhrase {
            phrase: rule.phrase.to_string(),
            suggestion: rule.suggestion.to_string(),
        })
        .collect()
}
