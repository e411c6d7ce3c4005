//! End-to-end scenarios through the public engine API.

use tc_compare::{CompareEngine, ComparisonResult, DiffKind, DiffSegment};
use tc_core::{ComparisonRequest, Granularity, MetricKind, TcError};

fn engine() -> CompareEngine {
    CompareEngine::default()
}

fn all_scores(left: &str, right: &str) -> ComparisonResult {
    engine()
        .compare(&ComparisonRequest::all_similarity(left, right))
        .expect("similarity request should succeed")
}

#[test]
fn identical_sentence_is_one_equal_segment_and_full_scores() {
    let text = "The quick brown fox";
    for g in [Granularity::Line, Granularity::Word] {
        let result = engine()
            .compare(&ComparisonRequest::diff(text, text, g))
            .unwrap();
        assert_eq!(
            result.segments().unwrap(),
            &[DiffSegment::new(text, DiffKind::Equal)]
        );
    }

    let result = all_scores(text, text);
    for metric in MetricKind::ALL {
        let value = result.score(metric).unwrap();
        assert!((value - 100.0).abs() < 1e-9, "{} = {}", metric, value);
    }
}

#[test]
fn single_substitution_damerau_score() {
    let result = engine()
        .compare(&ComparisonRequest::similarity("abc", "abd", MetricKind::DamerauLevenshtein))
        .unwrap();
    let value = result.score(MetricKind::DamerauLevenshtein).unwrap();
    assert!((value - 100.0 * (1.0 - 1.0 / 3.0)).abs() < 1e-9);
    assert_eq!(format!("{:.2}", value), "66.67");
}

#[test]
fn empty_left_against_hello() {
    let result = engine()
        .compare(&ComparisonRequest::diff("", "hello", Granularity::Line))
        .unwrap();
    assert_eq!(
        result.segments().unwrap(),
        &[DiffSegment::new("hello", DiffKind::Added)]
    );

    let result = engine()
        .compare(&ComparisonRequest::similarity("", "hello", MetricKind::EditRatio))
        .unwrap();
    assert_eq!(result.score(MetricKind::EditRatio), Some(0.0));
}

#[test]
fn both_empty_scores_100_and_diff_is_empty() {
    let result = all_scores("", "");
    for metric in MetricKind::ALL {
        assert_eq!(result.score(metric), Some(100.0), "{}", metric);
    }
    for g in [Granularity::Line, Granularity::Word] {
        let result = engine().compare(&ComparisonRequest::diff("", "", g)).unwrap();
        assert!(result.segments().unwrap().is_empty());
    }
}

#[test]
fn unsupported_metric_is_rejected_before_computation() {
    let err = ComparisonRequest::from_json(r#"{"left":"a","right":"b","mode":"hamming"}"#)
        .unwrap_err();
    assert!(matches!(err, TcError::InvalidRequest(_)));
}

#[test]
fn request_json_drives_the_engine() {
    let req = ComparisonRequest::from_json(
        r#"{"left":"a b c","right":"a x c","mode":"diff","granularity":"words"}"#,
    )
    .unwrap();
    let result = engine().compare(&req).unwrap();
    assert_eq!(result.to_report(), "a [-b-]{+x+} c");
}

#[test]
fn metrics_may_disagree() {
    // Same words in a different order: tokens match fully, characters do not.
    let result = all_scores("alpha beta gamma", "gamma beta alpha");
    let cosine = result.score(MetricKind::CosineTfIdf).unwrap();
    let damerau = result.score(MetricKind::DamerauLevenshtein).unwrap();
    assert!((cosine - 100.0).abs() < 1e-9);
    assert!(damerau < 100.0);
}

#[test]
fn report_of_all_scores_lists_every_metric() {
    let report = all_scores("abc", "abd").to_report();
    assert_eq!(report.lines().count(), 4);
    assert!(report.contains("Damerau-Levenshtein: 66.67%"));
}
