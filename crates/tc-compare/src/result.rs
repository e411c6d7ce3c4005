//! Comparison result types: the structured output of the engine.
//!
//! A result is either a diff or a score set, never both. Serialized to JSON
//! it carries a `type` tag so a display layer can branch on it.

use serde::{Deserialize, Serialize};

use tc_core::{Granularity, MetricKind};

use crate::diff::{DiffKind, DiffSegment};
use crate::metric::SimilarityScore;

// ---------------------------------------------------------------------------
// ComparisonResult
// ---------------------------------------------------------------------------

/// The output of a single comparison request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComparisonResult {
    /// Ordered, coalesced diff segments.
    Diff {
        granularity: Granularity,
        segments: Vec<DiffSegment>,
    },
    /// One score per requested metric, in request order.
    Similarity { scores: Vec<SimilarityScore> },
}

impl ComparisonResult {
    pub fn segments(&self) -> Option<&[DiffSegment]> {
        match self {
            ComparisonResult::Diff { segments, .. } => Some(segments),
            ComparisonResult::Similarity { .. } => None,
        }
    }

    pub fn scores(&self) -> Option<&[SimilarityScore]> {
        match self {
            ComparisonResult::Diff { .. } => None,
            ComparisonResult::Similarity { scores } => Some(scores),
        }
    }

    /// Score of `metric`, if this result carries it.
    pub fn score(&self, metric: MetricKind) -> Option<f64> {
        self.scores()?
            .iter()
            .find(|s| s.metric == metric)
            .map(|s| s.value)
    }

    /// Plain-text rendering suitable for copying out of a UI.
    ///
    /// Line diffs are prefixed `+ `, `- ` or two spaces per line. Word diffs
    /// stay inline with `[-removed-]` and `{+added+}` markers. Scores print as
    /// `<label>: <value>%` with two decimals, one per line.
    pub fn to_report(&self) -> String {
        match self {
            ComparisonResult::Diff {
                granularity: Granularity::Line,
                segments,
            } => line_report(segments),
            ComparisonResult::Diff {
                granularity: Granularity::Word,
                segments,
            } => word_report(segments),
            ComparisonResult::Similarity { scores } => scores
                .iter()
                .map(|score| format!("{}: {:.2}%\n", score.metric.label(), score.value))
                .collect(),
        }
    }
}

fn line_report(segments: &[DiffSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        let prefix = match segment.kind {
            DiffKind::Equal => "  ",
            DiffKind::Added => "+ ",
            DiffKind::Removed => "- ",
        };
        for line in segment.value.split_inclusive('\n') {
            out.push_str(prefix);
            out.push_str(line);
            if !line.ends_with('\n') {
                out.push('\n');
            }
        }
    }
    out
}

fn word_report(segments: &[DiffSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            DiffKind::Equal => out.push_str(&segment.value),
            DiffKind::Added => out.push_str(&format!("{{+{}+}}", segment.value)),
            DiffKind::Removed => out.push_str(&format!("[-{}-]", segment.value)),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
