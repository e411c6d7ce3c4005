//! Comparison engine: request validation, dispatch and batch execution.
//!
//! [`CompareEngine`] is the primary entry point. A single request is handled
//! synchronously on the calling thread; [`CompareEngine::compare_batch`] fans
//! independent requests out over a rayon pool and returns results in input
//! order.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tc_core::{ComparisonMode, ComparisonRequest, Granularity, Result, TcError};

use crate::diff::{diff_with, DiffAlgorithm};
use crate::lines::{render_lines, RenderedDiff};
use crate::metric::{score_all, DocumentPair};
use crate::result::ComparisonResult;

// ---------------------------------------------------------------------------
// CompareConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for the compare engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompareConfig {
    /// Alignment algorithm for diff requests.
    /// Default: Myers.
    pub diff_algorithm: DiffAlgorithm,
    /// Render a removed run directly followed by an added run as `Changed`
    /// rows with a word-level sub-diff.
    /// Default: false.
    pub pair_changed_lines: bool,
    /// Reject documents longer than this many characters.
    /// Default: no limit.
    pub max_document_chars: Option<usize>,
    /// Number of rayon worker threads for batch comparison.
    /// Default: `rayon::current_num_threads()`.
    pub worker_threads: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            diff_algorithm: DiffAlgorithm::Myers,
            pair_changed_lines: false,
            max_document_chars: None,
            worker_threads: rayon::current_num_threads(),
        }
    }
}

impl CompareConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CompareConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == 0 {
            return Err(TcError::InvalidConfig(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        if self.max_document_chars == Some(0) {
            return Err(TcError::InvalidConfig(
                "max_document_chars must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CompareEngine
// ---------------------------------------------------------------------------

/// Stateless comparison engine.
///
/// Holds only configuration; every call is a pure function of its request.
pub struct CompareEngine {
    config: CompareConfig,
}

impl CompareEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare one request and produce a [`ComparisonResult`].
    ///
    /// # Steps
    /// 1. Validate the request against the configuration.
    /// 2. For diff modes, split and align the documents.
    /// 3. For similarity modes, build a [`DocumentPair`] (tokenized at most
    ///    once) and score every requested metric independently.
    pub fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult> {
        let start = Instant::now();

        if let Err(err) = self.validate(request) {
            warn!(mode = %request.mode, error = %err, "compare_rejected");
            return Err(err);
        }

        let result = match request.mode {
            ComparisonMode::Diff(granularity) => ComparisonResult::Diff {
                granularity,
                segments: diff_with(
                    &request.left,
                    &request.right,
                    granularity,
                    self.config.diff_algorithm,
                ),
            },
            ComparisonMode::Similarity(_) | ComparisonMode::AllSimilarity => {
                let pair = DocumentPair::new(&request.left, &request.right);
                ComparisonResult::Similarity {
                    scores: score_all(&request.mode.metrics(), &pair),
                }
            }
        };

        debug!(
            mode = %request.mode,
            left_chars = request.left.chars().count(),
            right_chars = request.right.chars().count(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "compare"
        );
        Ok(result)
    }

    /// Compare independent requests in parallel.
    ///
    /// The returned vector is in input order; a failing request yields its
    /// own `Err` without affecting the others. Fails as a whole only if the
    /// worker pool cannot be built.
    pub fn compare_batch(&self, requests: &[ComparisonRequest]) -> Result<Vec<Result<ComparisonResult>>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_threads)
            .build()
            .map_err(|e| TcError::Internal(format!("failed to build worker pool: {}", e)))?;

        let start = Instant::now();
        let results: Vec<Result<ComparisonResult>> =
            pool.install(|| requests.par_iter().map(|req| self.compare(req)).collect());

        debug!(
            requests = requests.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            worker_threads = self.config.worker_threads,
            elapsed_micros = start.elapsed().as_micros() as u64,
            "compare_batch"
        );
        Ok(results)
    }

    /// Diff a line-granularity request and render it as numbered rows.
    pub fn render_lines(&self, request: &ComparisonRequest) -> Result<RenderedDiff> {
        if request.mode != ComparisonMode::Diff(Granularity::Line) {
            let err = TcError::InvalidRequest(format!(
                "line rendering requires diff/line mode, got {}",
                request.mode
            ));
            warn!(mode = %request.mode, error = %err, "render_rejected");
            return Err(err);
        }
        let result = self.compare(request)?;
        let segments = result.segments().unwrap_or_default();
        Ok(RenderedDiff::new(render_lines(
            segments,
            self.config.pair_changed_lines,
        )))
    }

    /// Check the request against configured limits before any computation.
    fn validate(&self, request: &ComparisonRequest) -> Result<()> {
        if let Some(limit) = self.config.max_document_chars {
            for (side, text) in [("left", &request.left), ("right", &request.right)] {
                let chars = text.chars().count();
                if chars > limit {
                    return Err(TcError::InvalidRequest(format!(
                        "{} document has {} characters, limit is {}",
                        side, chars, limit
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for CompareEngine {
    fn default() -> Self {
        Self::new(CompareConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
