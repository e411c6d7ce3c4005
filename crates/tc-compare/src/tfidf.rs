//! TF-IDF weighted cosine similarity.
//!
//! Term vectors are keyed by token text in a `BTreeMap` so that every
//! floating-point sum runs in a fixed order and repeated calls give
//! bit-identical scores.
//!
//! Weighting over a corpus of `N` documents:
//!
//! ```text
//! tf(t, d)  = count(t, d) / |d|
//! idf(t)    = ln(N / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t)
//! ```
//!
//! For the two-document corpus used by the comparison engine, a term found in
//! one document weighs `1.0` and a term found in both weighs `ln(2/3) + 1`.

use std::collections::{BTreeMap, BTreeSet};

/// Sparse term → weight vector.
pub type TermVector<'a> = BTreeMap<&'a str, f64>;

/// Relative frequency of each token in `tokens`. Empty input gives an empty
/// vector.
pub fn term_frequencies(tokens: &[String]) -> TermVector<'_> {
    let mut tf: TermVector<'_> = BTreeMap::new();
    if tokens.is_empty() {
        return tf;
    }
    for token in tokens {
        *tf.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    let total = tokens.len() as f64;
    for weight in tf.values_mut() {
        *weight /= total;
    }
    tf
}

/// Smoothed inverse document frequency for every distinct token in `docs`.
pub fn inverse_document_frequencies<'a>(docs: &[&'a [String]]) -> TermVector<'a> {
    let doc_count = docs.len() as f64;
    let doc_sets: Vec<BTreeSet<&'a str>> = docs
        .iter()
        .map(|doc| doc.iter().map(String::as_str).collect())
        .collect();

    let mut idf: TermVector<'a> = BTreeMap::new();
    for set in &doc_sets {
        for &term in set {
            if idf.contains_key(term) {
                continue;
            }
            let containing = doc_sets.iter().filter(|s| s.contains(term)).count() as f64;
            idf.insert(term, (doc_count / (1.0 + containing)).ln() + 1.0);
        }
    }
    idf
}

/// Multiply each term frequency by its inverse document frequency.
///
/// Terms missing from `idf` weigh zero.
pub fn weighted_vector<'a>(tf: &TermVector<'a>, idf: &TermVector<'a>) -> TermVector<'a> {
    tf.iter()
        .map(|(&term, &freq)| (term, freq * idf.get(term).copied().unwrap_or(0.0)))
        .collect()
}

/// Euclidean length of a term vector.
pub fn magnitude(vector: &TermVector<'_>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine of the angle between two term vectors, as a percentage.
///
/// When either vector has zero magnitude the result is 100.
pub fn cosine_similarity(left: &TermVector<'_>, right: &TermVector<'_>) -> f64 {
    let left_mag = magnitude(left);
    let right_mag = magnitude(right);
    if left_mag == 0.0 || right_mag == 0.0 {
        return 100.0;
    }
    let dot: f64 = left
        .iter()
        .filter_map(|(term, lw)| right.get(term).map(|rw| lw * rw))
        .sum();
    (100.0 * dot / (left_mag * right_mag)).clamp(0.0, 100.0)
}

/// TF-IDF cosine similarity between two token sequences, treating the pair
/// as the whole corpus.
pub fn cosine_tf_idf(left: &[String], right: &[String]) -> f64 {
    let idf = inverse_document_frequencies(&[left, right]);
    let left_vec = weighted_vector(&term_frequencies(left), &idf);
    let right_vec = weighted_vector(&term_frequencies(right), &idf);
    cosine_similarity(&left_vec, &right_vec)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
