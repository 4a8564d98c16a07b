use std::collections::HashSet;

use crate::analysis::tfidf::TermWeights;

/// Cosine similarity over the union of both vectors' keys; absent keys count as 0.
///
/// Returns exactly 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &TermWeights, b: &TermWeights) -> f64 {
    let keys: HashSet<&String> = a.keys().chain(b.keys()).collect();

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for key in keys {
        let va = a.get(key).copied().unwrap_or(0.0);
        let vb = b.get(key).copied().unwrap_or(0.0);
        dot += va * vb;
        mag_a += va * va;
        mag_b += vb * vb;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a.sqrt() * mag_b.sqrt())
}
