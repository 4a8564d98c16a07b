#![allow(dead_code)]

//! Tokenizer: the leaf of every text path in the analysis engine.
//!
//! Lowercases, turns anything that is not a word character or whitespace into
//! a space, splits on whitespace, then drops short tokens and stopwords.
//! No stemming, no locale awareness.

use std::collections::HashMap;

/// Tokens of this many characters or fewer are discarded.
const MIN_TOKEN_CHARS: usize = 2;

/// Common function words excluded from every token stream.
pub const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "and", "or", "but", "in", "with", "to", "for", "of", "as",
    "by", "an", "be", "this", "that", "from", "was", "are", "been", "has", "have", "had", "do",
    "does", "did", "will", "would", "could", "should", "may", "might", "can",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Lowercases and replaces every non-word, non-space character with a space.
/// Word characters are ASCII letters, digits and `_`.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Splits `text` into filtered, lowercased tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Raw per-token counts for `text`.
pub fn term_counts(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Contiguous `n`-token windows, joined by a single space.
///
/// Unlike [`tokenize`], no length or stopword filtering is applied, so phrases
/// such as "responsible for" survive intact.
pub fn extract_ngrams(text: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let normalized = normalize(text);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    words.windows(n).map(|w| w.join(" ")).collect()
}
