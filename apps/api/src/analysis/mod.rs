// Résumé analysis: tokenizer, TF-IDF, lexical detectors, scorer, recommendations.

pub mod analyzer;
pub mod entities;
pub mod handlers;
pub mod recommendations;
pub mod scorer;
pub mod sentiment;
pub mod similarity;
pub mod tfidf;
pub mod tokenizer;
pub mod verbs;
pub mod weak_phrases;
