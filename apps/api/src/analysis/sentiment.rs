//! Impact sentiment: a keyword-presence polarity scan over whitespace-split words.

use serde::{Deserialize, Serialize};

/// Substrings that mark an outcome-oriented word.
const POSITIVE_MARKERS: &[&str] = &[
    "achieved",
    "improved",
    "increased",
    "optimized",
    "successful",
    "led",
    "developed",
    "created",
    "delivered",
    "enhanced",
    "streamlined",
    "pioneered",
    "accelerated",
    "transformed",
    "excellent",
    "outstanding",
    "innovative",
];

/// Substrings that mark a negative or passive word.
/// Multi-word entries cannot match a single whitespace-split word.
const NEGATIVE_MARKERS: &[&str] = &[
    "failed",
    "decreased",
    "reduced",
    "problem",
    "issue",
    "difficult",
    "responsible for",
    "helped with",
    "worked on",
    "assisted",
    "participated",
];

/// Multiplier on the net marker count per word. One net marker in ten words
/// already reaches the [-1, 1] bound.
const DENSITY_SCALE: f64 = 10.0;
const STRONG_THRESHOLD: f64 = 0.3;
const WEAK_THRESHOLD: f64 = -0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Strong,
    #[default]
    Neutral,
    Weak,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// In [-1, 1].
    pub score: f64,
    pub label: SentimentLabel,
}

/// Scores `text` in [-1, 1]. A word can both add and subtract.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return Sentiment::default();
    }

    let mut raw = 0i64;
    for word in &words {
        if POSITIVE_MARKERS.iter().any(|m| word.contains(m)) {
            raw += 1;
        }
        if NEGATIVE_MARKERS.iter().any(|m| word.contains(m)) {
            raw -= 1;
        }
    }

    let score = (raw as f64 / words.len() as f64 * DENSITY_SCALE).clamp(-1.0, 1.0);
    let label = if score > STRONG_THRESHOLD {
        SentimentLabel::Strong
    } else if score < WEAK_THRESHOLD {
        SentimentLabel::Weak
    } else {
        SentimentLabel::Neutral
    };

    Sentiment { score, label }
}
