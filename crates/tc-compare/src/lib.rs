pub mod tokenize;
pub mod diff;
pub mod edit;
pub mod lcs;
pub mod tfidf;
pub mod metric;
pub mod lines;
pub mod worker;
pub mod result;

pub use diff::{diff, DiffAlgorithm, DiffKind, DiffSegment};
pub use lines::{render_lines, DiffLine, DiffStats, LineKind, RenderedDiff};
pub use metric::{DocumentPair, SimilarityScore};
pub use result::*;
pub use worker::{CompareConfig, CompareEngine};
