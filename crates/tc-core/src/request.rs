use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TcError};

// ---------------------------------------------------------------------------
// Granularity
// ---------------------------------------------------------------------------

/// Unit of comparison for the sequence diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Whole lines, each carrying the newline that terminates it.
    Line,
    /// Words and the whitespace/punctuation runs between them.
    Word,
}

impl Granularity {
    pub fn name(self) -> &'static str {
        match self {
            Granularity::Line => "line",
            Granularity::Word => "word",
        }
    }
}

impl FromStr for Granularity {
    type Err = TcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" | "lines" => Ok(Granularity::Line),
            "word" | "words" => Ok(Granularity::Word),
            other => Err(TcError::InvalidRequest(format!(
                "unsupported granularity {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// MetricKind
// ---------------------------------------------------------------------------

/// One of the independent similarity algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Ratcliff/Obershelp matching ratio over characters.
    EditRatio,
    /// Normalized Damerau–Levenshtein (optimal string alignment) distance.
    DamerauLevenshtein,
    /// Case-insensitive longest common subsequence over characters.
    LongestCommonSubsequence,
    /// TF-IDF weighted cosine similarity over word tokens.
    CosineTfIdf,
}

impl MetricKind {
    /// Every metric, in the order `AllSimilarity` reports them.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::EditRatio,
        MetricKind::DamerauLevenshtein,
        MetricKind::LongestCommonSubsequence,
        MetricKind::CosineTfIdf,
    ];

    /// Canonical wire name (matches the serde representation).
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::EditRatio => "edit_ratio",
            MetricKind::DamerauLevenshtein => "damerau_levenshtein",
            MetricKind::LongestCommonSubsequence => "longest_common_subsequence",
            MetricKind::CosineTfIdf => "cosine_tf_idf",
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::EditRatio => "Edit ratio",
            MetricKind::DamerauLevenshtein => "Damerau-Levenshtein",
            MetricKind::LongestCommonSubsequence => "Longest common subsequence",
            MetricKind::CosineTfIdf => "TF-IDF cosine",
        }
    }

    /// Whether the metric consumes word tokens rather than raw characters.
    pub fn needs_tokens(self) -> bool {
        matches!(self, MetricKind::CosineTfIdf)
    }
}

impl FromStr for MetricKind {
    type Err = TcError;

    /// Accepts the canonical names as well as the short engine names used by
    /// the comparison UI (`fuzzball`, `damerau`, `lcs`, `cosine`, `tfidf`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edit_ratio" | "ratio" | "fuzzball" => Ok(MetricKind::EditRatio),
            "damerau_levenshtein" | "damerau" => Ok(MetricKind::DamerauLevenshtein),
            "longest_common_subsequence" | "lcs" => Ok(MetricKind::LongestCommonSubsequence),
            "cosine_tf_idf" | "cosine" | "tfidf" => Ok(MetricKind::CosineTfIdf),
            other => Err(TcError::InvalidRequest(format!(
                "unsupported metric {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ComparisonMode
// ---------------------------------------------------------------------------

/// What a single request asks the engine to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Diff(Granularity),
    Similarity(MetricKind),
    AllSimilarity,
}

impl ComparisonMode {
    /// Parse a mode selector as it arrives from a host.
    ///
    /// `granularity` is only meaningful for `diff`; it defaults to `line` when
    /// absent and is rejected for every similarity mode.
    pub fn parse(mode: &str, granularity: Option<&str>) -> Result<Self> {
        let mode = mode.trim().to_ascii_lowercase();
        match mode.as_str() {
            "diff" => {
                let granularity = match granularity {
                    Some(g) => g.parse()?,
                    None => Granularity::Line,
                };
                Ok(ComparisonMode::Diff(granularity))
            }
            other => {
                if let Some(g) = granularity {
                    return Err(TcError::InvalidRequest(format!(
                        "granularity {:?} is only valid for diff mode, got mode {:?}",
                        g, other
                    )));
                }
                if other == "all" {
                    Ok(ComparisonMode::AllSimilarity)
                } else {
                    Ok(ComparisonMode::Similarity(other.parse()?))
                }
            }
        }
    }

    /// Metrics this mode computes; empty for diff modes.
    pub fn metrics(&self) -> Vec<MetricKind> {
        match self {
            ComparisonMode::Diff(_) => Vec::new(),
            ComparisonMode::Similarity(metric) => vec![*metric],
            ComparisonMode::AllSimilarity => MetricKind::ALL.to_vec(),
        }
    }

    pub fn is_diff(&self) -> bool {
        matches!(self, ComparisonMode::Diff(_))
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonMode::Diff(g) => write!(f, "diff/{}", g),
            ComparisonMode::Similarity(m) => write!(f, "{}", m),
            ComparisonMode::AllSimilarity => f.write_str("all"),
        }
    }
}

// ---------------------------------------------------------------------------
// ComparisonRequest
// ---------------------------------------------------------------------------

/// Two documents plus the mode to compare them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub left: String,
    pub right: String,
    pub mode: ComparisonMode,
}

/// JSON shape of a request as it crosses the host boundary.
///
/// Mode and granularity stay strings here so that an unsupported name is
/// reported as [`TcError::InvalidRequest`] rather than a serde error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    pub left: String,
    pub right: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

impl ComparisonRequest {
    pub fn new(left: impl Into<String>, right: impl Into<String>, mode: ComparisonMode) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            mode,
        }
    }

    pub fn diff(left: impl Into<String>, right: impl Into<String>, granularity: Granularity) -> Self {
        Self::new(left, right, ComparisonMode::Diff(granularity))
    }

    pub fn similarity(left: impl Into<String>, right: impl Into<String>, metric: MetricKind) -> Self {
        Self::new(left, right, ComparisonMode::Similarity(metric))
    }

    pub fn all_similarity(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, right, ComparisonMode::AllSimilarity)
    }

    /// Parse a request from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: WireRequest = serde_json::from_str(json)?;
        Self::try_from(wire)
    }
}

impl TryFrom<WireRequest> for ComparisonRequest {
    type Error = TcError;

    fn try_from(wire: WireRequest) -> Result<Self> {
        let mode = ComparisonMode::parse(&wire.mode, wire.granularity.as_deref())?;
        Ok(Self {
            left: wire.left,
            right: wire.right,
            mode,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff_defaults_to_line() {
        let mode = ComparisonMode::parse("diff", None).unwrap();
        assert_eq!(mode, ComparisonMode::Diff(Granularity::Line));
    }

    #[test]
    fn parse_diff_with_word_granularity() {
        let mode = ComparisonMode::parse("Diff", Some("words")).unwrap();
        assert_eq!(mode, ComparisonMode::Diff(Granularity::Word));
    }

    #[test]
    fn parse_ui_engine_aliases() {
        assert_eq!(
            ComparisonMode::parse("fuzzball", None).unwrap(),
            ComparisonMode::Similarity(MetricKind::EditRatio)
        );
        assert_eq!(
            ComparisonMode::parse("damerau", None).unwrap(),
            ComparisonMode::Similarity(MetricKind::DamerauLevenshtein)
        );
        assert_eq!(
            ComparisonMode::parse("lcs", None).unwrap(),
            ComparisonMode::Similarity(MetricKind::LongestCommonSubsequence)
        );
        assert_eq!(
            ComparisonMode::parse("cosine", None).unwrap(),
            ComparisonMode::Similarity(MetricKind::CosineTfIdf)
        );
        assert_eq!(
            ComparisonMode::parse("TFIDF", None).unwrap(),
            ComparisonMode::Similarity(MetricKind::CosineTfIdf)
        );
        assert_eq!(
            ComparisonMode::parse("all", None).unwrap(),
            ComparisonMode::AllSimilarity
        );
    }

    #[test]
    fn canonical_names_round_trip_through_from_str() {
        for metric in MetricKind::ALL {
            assert_eq!(metric.name().parse::<MetricKind>().unwrap(), metric);
        }
    }

    #[test]
    fn unknown_metric_is_invalid_request() {
        let err = ComparisonMode::parse("jaro_winkler", None).unwrap_err();
        assert!(matches!(err, TcError::InvalidRequest(_)), "got {:?}", err);
    }

    #[test]
    fn unknown_granularity_is_invalid_request() {
        let err = ComparisonMode::parse("diff", Some("chars")).unwrap_err();
        assert!(matches!(err, TcError::InvalidRequest(_)));
    }

    #[test]
    fn granularity_on_similarity_mode_is_rejected() {
        let err = ComparisonMode::parse("lcs", Some("line")).unwrap_err();
        assert!(matches!(err, TcError::InvalidRequest(_)));
    }

    #[test]
    fn all_mode_lists_every_metric_in_order() {
        assert_eq!(ComparisonMode::AllSimilarity.metrics(), MetricKind::ALL.to_vec());
        assert!(ComparisonMode::Diff(Granularity::Word).metrics().is_empty());
    }

    #[test]
    fn request_from_json() {
        let req = ComparisonRequest::from_json(
            r#"{"left":"a\nb","right":"a\nc","mode":"diff","granularity":"word"}"#,
        )
        .unwrap();
        assert_eq!(req.left, "a\nb");
        assert_eq!(req.mode, ComparisonMode::Diff(Granularity::Word));
    }

    #[test]
    fn request_from_json_with_bad_mode_is_invalid_request() {
        let err = ComparisonRequest::from_json(r#"{"left":"","right":"","mode":"soundex"}"#)
            .unwrap_err();
        assert!(matches!(err, TcError::InvalidRequest(_)));
    }

    #[test]
    fn request_from_malformed_json_is_serialization_error() {
        let err = ComparisonRequest::from_json("{not json").unwrap_err();
        assert!(matches!(err, TcError::Serialization(_)));
    }

    #[test]
    fn metric_kind_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&MetricKind::CosineTfIdf).unwrap(),
            "\"cosine_tf_idf\""
        );
        assert_eq!(
            serde_json::to_string(&MetricKind::DamerauLevenshtein).unwrap(),
            "\"damerau_levenshtein\""
        );
    }
}
