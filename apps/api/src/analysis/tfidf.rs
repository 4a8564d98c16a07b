#![allow(dead_code)]

//! TF-IDF model built once over a small, fixed corpus.
//!
//! `idf(term) = ln(N / (1 + df(term)))`. The +1 keeps the value finite, and
//! makes it zero or negative for terms present in most of the corpus. With the
//! usual two-document corpus (résumé + job description) shared terms weigh
//! `ln(2/3)` and single-document terms weigh `ln(1) = 0`, so weights are
//! compared by cosine, never by sign.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::tokenize;

/// Sparse token → weight map. Absent keys mean weight 0.
pub type TermWeights = HashMap<String, f64>;

/// A keyword and its TF-IDF weight within one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub keyword: String,
    pub score: f64,
}

/// Vocabulary and IDF table derived from one corpus. Immutable after construction.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    vocabulary: HashSet<String>,
    idf: HashMap<String, f64>,
    corpus_size: usize,
}

impl TfIdfModel {
    /// Builds the vocabulary and IDF table from `corpus`.
    pub fn new<S: AsRef<str>>(corpus: &[S]) -> Self {
        let documents: Vec<HashSet<String>> = corpus
            .iter()
            .map(|doc| tokenize(doc.as_ref()).into_iter().collect())
            .collect();

        let mut doc_frequency: HashMap<&str, usize> = HashMap::new();
        for terms in &documents {
            for term in terms {
                *doc_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let corpus_size = documents.len();
        let idf = doc_frequency
            .iter()
            .map(|(term, df)| {
                let value = (corpus_size as f64 / (1.0 + *df as f64)).ln();
                (term.to_string(), value)
            })
            .collect();
        let vocabulary = doc_frequency.keys().map(|t| t.to_string()).collect();

        Self {
            vocabulary,
            idf,
            corpus_size,
        }
    }

    pub fn vocabulary(&self) -> &HashSet<String> {
        &self.vocabulary
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    /// IDF of `term`, 0 for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// TF-IDF vector for `document`. TF is a proportion of the document's token count.
    pub fn tfidf(&self, document: &str) -> TermWeights {
        self.weighted_terms(document).into_iter().collect()
    }

    /// The `top_n` highest-weighted terms of `document`.
    /// Equal weights keep the order in which terms first appear in the document.
    pub fn top_keywords(&self, document: &str, top_n: usize) -> Vec<KeywordScore> {
        let mut scored: Vec<KeywordScore> = self
            .weighted_terms(document)
            .into_iter()
            .map(|(keyword, score)| KeywordScore { keyword, score })
            .collect();
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_n);
        scored
    }

    /// (term, tf * idf) pairs in first-appearance order.
    fn weighted_terms(&self, document: &str) -> Vec<(String, f64)> {
        let tokens = tokenize(document);
        if tokens.is_empty() {
            return Vec::new();
        }
        let doc_len = tokens.len() as f64;

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }

        order
            .into_iter()
            .map(|term| {
                let tf = counts.get(&term).copied().unwrap_or(0) as f64 / doc_len;
                let weight = tf * self.idf(&term);
                (term, weight)
            })
            .collect()
    }
}
