//! Similarity metric dispatch.
//!
//! Each [`MetricKind`] maps to one pure function over a [`DocumentPair`].
//! The pair tokenizes lazily and at most once, so running every metric under
//! `AllSimilarity` shares a single tokenization.

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use tc_core::MetricKind;

use crate::edit::{damerau_levenshtein, edit_ratio};
use crate::lcs::lcs_similarity;
use crate::tfidf::cosine_tf_idf;
use crate::tokenize::tokenize;

// ---------------------------------------------------------------------------
// SimilarityScore
// ---------------------------------------------------------------------------

/// One metric's score for a document pair, as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimilarityScore {
    pub metric: MetricKind,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// DocumentPair
// ---------------------------------------------------------------------------

/// The two documents of one request, plus their word tokens once computed.
pub struct DocumentPair<'a> {
    left: &'a str,
    right: &'a str,
    tokens: OnceCell<(Vec<String>, Vec<String>)>,
}

impl<'a> DocumentPair<'a> {
    pub fn new(left: &'a str, right: &'a str) -> Self {
        Self {
            left,
            right,
            tokens: OnceCell::new(),
        }
    }

    pub fn left(&self) -> &'a str {
        self.left
    }

    pub fn right(&self) -> &'a str {
        self.right
    }

    /// Word tokens of both documents, tokenized on first use.
    pub fn tokens(&self) -> (&[String], &[String]) {
        let (left, right) = self
            .tokens
            .get_or_init(|| (tokenize(self.left), tokenize(self.right)));
        (left.as_slice(), right.as_slice())
    }

    /// Whether [`DocumentPair::tokens`] has already run.
    pub fn is_tokenized(&self) -> bool {
        self.tokens.get().is_some()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Compute one metric over `pair`.
pub fn compute(metric: MetricKind, pair: &DocumentPair<'_>) -> f64 {
    match metric {
        MetricKind::EditRatio => edit_ratio(pair.left(), pair.right()),
        MetricKind::DamerauLevenshtein => damerau_levenshtein(pair.left(), pair.right()),
        MetricKind::LongestCommonSubsequence => lcs_similarity(pair.left(), pair.right()),
        MetricKind::CosineTfIdf => {
            let (left, right) = pair.tokens();
            cosine_tf_idf(left, right)
        }
    }
}

/// Score `pair` under each metric in `metrics`, preserving order.
pub fn score_all(metrics: &[MetricKind], pair: &DocumentPair<'_>) -> Vec<SimilarityScore> {
    metrics
        .iter()
        .map(|&metric| SimilarityScore {
            metric,
            value: compute(metric, pair),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
