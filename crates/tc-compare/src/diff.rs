//! Line- and word-level diff using the `similar` crate.
//!
//! Each document is partitioned into units by [`crate::tokenize::split_units`]
//! and the unit sequences are aligned with a shortest-edit-script algorithm.
//! Consecutive units of the same disposition are coalesced into a single
//! [`DiffSegment`], so the output alternates between kinds.
//!
//! Segment values are the raw unit text, which keeps the reconstruction
//! invariant exact: the non-`Removed` values concatenate to `right` and the
//! non-`Added` values concatenate to `left`.

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffOp};

use tc_core::Granularity;

use crate::tokenize::split_units;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Disposition of a run of units in the diff output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    Equal,
    Added,
    Removed,
}

/// A coalesced run of units sharing one [`DiffKind`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSegment {
    pub value: String,
    pub kind: DiffKind,
}

impl DiffSegment {
    pub fn new(value: impl Into<String>, kind: DiffKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

/// Edit-script algorithm used to align unit sequences.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffAlgorithm {
    /// Myers O(ND) with common prefix/suffix trimming.
    #[default]
    Myers,
    /// Classic dynamic-programming LCS table.
    Lcs,
    /// Patience diff anchored on unique units.
    Patience,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
            DiffAlgorithm::Patience => Algorithm::Patience,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Diff `left` against `right` at the given granularity using Myers.
pub fn diff(left: &str, right: &str, granularity: Granularity) -> Vec<DiffSegment> {
    diff_with(left, right, granularity, DiffAlgorithm::default())
}

/// Diff `left` against `right` with an explicit alignment algorithm.
pub fn diff_with(
    left: &str,
    right: &str,
    granularity: Granularity,
    algorithm: DiffAlgorithm,
) -> Vec<DiffSegment> {
    let old = split_units(left, granularity);
    let new = split_units(right, granularity);
    diff_units(&old, &new, algorithm)
}

/// Align two pre-split unit sequences and coalesce the result.
///
/// Within a replaced region the removed run is emitted before the added run.
pub fn diff_units(old: &[&str], new: &[&str], algorithm: DiffAlgorithm) -> Vec<DiffSegment> {
    let ops = similar::capture_diff_slices(algorithm.into(), old, new);

    let mut segments: Vec<DiffSegment> = Vec::new();
    for op in &ops {
        match *op {
            DiffOp::Equal { old_index, len, .. } => {
                push_run(&mut segments, DiffKind::Equal, &old[old_index..old_index + len]);
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                push_run(&mut segments, DiffKind::Removed, &old[old_index..old_index + old_len]);
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                push_run(&mut segments, DiffKind::Added, &new[new_index..new_index + new_len]);
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                push_run(&mut segments, DiffKind::Removed, &old[old_index..old_index + old_len]);
                push_run(&mut segments, DiffKind::Added, &new[new_index..new_index + new_len]);
            }
        }
    }

    segments
}

/// Rebuild the left document from a diff.
pub fn left_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Added)
        .map(|s| s.value.as_str())
        .collect()
}

/// Rebuild the right document from a diff.
pub fn right_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Removed)
        .map(|s| s.value.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Append `units` to the trailing segment when its kind matches, otherwise
/// start a new segment.
fn push_run(segments: &mut Vec<DiffSegment>, kind: DiffKind, units: &[&str]) {
    if units.is_empty() {
        return;
    }
    if let Some(last) = segments.last_mut() {
        if last.kind == kind {
            last.value.extend(units.iter().copied());
            return;
        }
    }
    segments.push(DiffSegment::new(units.concat(), kind));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
