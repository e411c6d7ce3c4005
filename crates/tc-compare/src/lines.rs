//! Line-numbered rendering of a line-granularity diff.
//!
//! Segments are split on their embedded newlines and numbered with two
//! running counters, one per document. Context rows advance both counters,
//! removed rows only the left one, added rows only the right one.
//!
//! With `pair_changed_lines`, a removed run immediately followed by an added
//! run is zipped line by line into `Changed` rows that carry a word-level
//! sub-diff. Lines left over on either side stay plain removed/added rows.

use serde::{Deserialize, Serialize};

use tc_core::Granularity;

use crate::diff::{diff, DiffKind, DiffSegment};

/// Display role of a rendered row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Context,
    Added,
    Removed,
    Changed,
}

/// One rendered diff row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    /// 1-based line number in the left document; `None` for added rows.
    pub old_number: Option<usize>,
    /// 1-based line number in the right document; `None` for removed rows.
    pub new_number: Option<usize>,
    /// Line text without its terminating newline. For `Changed` rows this is
    /// the right-hand line.
    pub text: String,
    /// Word-level sub-diff of a `Changed` row; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<DiffSegment>,
}

/// Row counts for a rendered diff.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl DiffStats {
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        let mut stats = DiffStats::default();
        for line in lines {
            match line.kind {
                LineKind::Context => stats.unchanged += 1,
                LineKind::Added => stats.added += 1,
                LineKind::Removed => stats.removed += 1,
                LineKind::Changed => stats.changed += 1,
            }
        }
        stats
    }
}

/// Rendered rows plus their counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedDiff {
    pub lines: Vec<DiffLine>,
    pub stats: DiffStats,
}

impl RenderedDiff {
    pub fn new(lines: Vec<DiffLine>) -> Self {
        let stats = DiffStats::from_lines(&lines);
        Self { lines, stats }
    }
}

/// Render line-granularity `segments` into numbered rows.
pub fn render_lines(segments: &[DiffSegment], pair_changed_lines: bool) -> Vec<DiffLine> {
    let mut counter = LineCounter::default();
    let mut rows = Vec::new();

    let mut i = 0;
    while i < segments.len() {
        let segment = &segments[i];
        match segment.kind {
            DiffKind::Equal => {
                for text in segment_lines(&segment.value) {
                    rows.push(counter.context(text));
                }
            }
            DiffKind::Removed
                if pair_changed_lines
                    && segments.get(i + 1).map(|s| s.kind) == Some(DiffKind::Added) =>
            {
                let removed = segment_lines(&segment.value);
                let added = segment_lines(&segments[i + 1].value);
                let paired = removed.len().min(added.len());

                for (old, new) in removed.iter().zip(&added) {
                    rows.push(counter.changed(old, new));
                }
                for text in &removed[paired..] {
                    rows.push(counter.removed(text));
                }
                for text in &added[paired..] {
                    rows.push(counter.added(text));
                }
                i += 2;
                continue;
            }
            DiffKind::Removed => {
                for text in segment_lines(&segment.value) {
                    rows.push(counter.removed(text));
                }
            }
            DiffKind::Added => {
                for text in segment_lines(&segment.value) {
                    rows.push(counter.added(text));
                }
            }
        }
        i += 1;
    }

    rows
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Lines of a segment value, each keeping its terminating newline.
fn segment_lines(value: &str) -> Vec<&str> {
    value.split_inclusive('\n').collect()
}

fn strip_newline(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

#[derive(Default)]
struct LineCounter {
    old: usize,
    new: usize,
}

impl LineCounter {
    fn context(&mut self, text: &str) -> DiffLine {
        self.old += 1;
        self.new += 1;
        row(LineKind::Context, Some(self.old), Some(self.new), text)
    }

    fn removed(&mut self, text: &str) -> DiffLine {
        self.old += 1;
        row(LineKind::Removed, Some(self.old), None, text)
    }

    fn added(&mut self, text: &str) -> DiffLine {
        self.new += 1;
        row(LineKind::Added, None, Some(self.new), text)
    }

    fn changed(&mut self, old: &str, new: &str) -> DiffLine {
        self.old += 1;
        self.new += 1;
        let mut line = row(LineKind::Changed, Some(self.old), Some(self.new), new);
        // A newline present on one side only is part of the change.
        line.words = if old.ends_with('\n') && new.ends_with('\n') {
            diff(strip_newline(old), strip_newline(new), Granularity::Word)
        } else {
            diff(old, new, Granularity::Word)
        };
        line
    }
}

fn row(kind: LineKind, old_number: Option<usize>, new_number: Option<usize>, text: &str) -> DiffLine {
    DiffLine {
        kind,
        old_number,
        new_number,
        text: strip_newline(text).to_string(),
        words: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
