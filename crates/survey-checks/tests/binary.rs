//! Tests for binary feature checks.

use polars::df;
use polars::prelude::*;
use survey_checks::checks::binary::{
    check_all_same, check_mostly_same, check_outside_range, validate_binary_kind,
};
use survey_checks::{InputShape, ReportValue, SurveyError};

fn good() -> DataFrame {
    df!(
        "g1" => [true, false, true, false],
        "g2" => [0i64, 1, 0, 1],
        "g3" => [false, true, false, true],
    )
    .unwrap()
}

fn column(df: &DataFrame, name: &str) -> Series {
    df.column(name).unwrap().as_materialized_series().clone()
}

#[test]
fn validate_accepts_booleans_and_integers() {
    let df = good();
    assert!(validate_binary_kind(&df).is_ok());
    assert!(validate_binary_kind(&column(&df, "g1")).is_ok());
}

#[test]
fn validate_rejects_text() {
    let df = df!(
        "b1" => ["True", "True", "False", "True"],
        "b2" => [false, true, false, true],
    )
    .unwrap();
    let err = validate_binary_kind(&df).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"binary columns must be of kind boolean or integer; column 'b1' has kind text"
    );
    assert!(matches!(
        validate_binary_kind(&column(&df, "b1")),
        Err(SurveyError::Kind { .. })
    ));
}

#[test]
fn validate_rejects_floats() {
    let df = df!(
        "b1" => [1.0f64, 0.0, 0.6, 0.9],
        "b2" => [false, true, false, true],
    )
    .unwrap();
    let err = validate_binary_kind(&df).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"binary columns must be of kind boolean or integer; column 'b1' has kind float"
    );
}

#[test]
fn checks_reject_wrong_kind_before_computing() {
    let df = df!("t" => ["a", "b"]).unwrap();
    assert!(matches!(check_all_same(&df), Err(SurveyError::Kind { .. })));
    assert!(matches!(
        check_mostly_same(&df, 0.5),
        Err(SurveyError::Kind { .. })
    ));
    assert!(matches!(
        check_outside_range(&df),
        Err(SurveyError::Kind { .. })
    ));
}

#[test]
fn all_same_passes_good_data() {
    let report = check_all_same(&good()).unwrap();
    assert_eq!(report.shape, InputShape::Table);
    assert_eq!(report.len(), 3);
    assert!(report.flagged_columns().is_empty());

    let single = check_all_same(&column(&good(), "g1")).unwrap();
    assert_eq!(single.shape, InputShape::Column);
    assert_eq!(single.first().unwrap().verdict, ReportValue::Bool(false));
}

#[test]
fn all_same_flags_constant_column() {
    let df = df!(
        "b1" => [1i64, 1, 1, 1],
        "b2" => [false, true, false, true],
    )
    .unwrap();
    let report = check_all_same(&df).unwrap();
    assert_eq!(report.verdict("b1"), Some(&ReportValue::Bool(true)));
    assert_eq!(report.verdict("b2"), Some(&ReportValue::Bool(false)));

    let single = check_all_same(&column(&df, "b1")).unwrap();
    assert!(single.first().unwrap().verdict.is_true());
    assert_eq!(single.first().unwrap().column, None);
}

#[test]
fn mostly_same_with_threshold() {
    let df = df!(
        "b1" => [true, true, true, false],
        "b2" => [false, true, false, true],
    )
    .unwrap();
    let report = check_mostly_same(&df, 0.7).unwrap();
    assert_eq!(report.metrics, vec!["thresh", "mean"]);
    assert_eq!(report.flagged_columns(), vec!["b1"]);
    assert_eq!(report.metric("b1", "mean"), Some(&ReportValue::Float(0.75)));
    assert_eq!(report.metric("b2", "mean"), Some(&ReportValue::Float(0.5)));
    assert_eq!(report.metric("b2", "thresh"), Some(&ReportValue::Float(0.7)));

    let single = check_mostly_same(&column(&df, "b1"), 0.7).unwrap();
    assert!(single.first().unwrap().verdict.is_true());
}

#[test]
fn mostly_same_detects_low_skew() {
    let df = df!("b" => [0i64, 0, 0, 0, 0, 0, 0, 0, 0, 1]).unwrap();
    let report = check_mostly_same(&df, 0.85).unwrap();
    assert_eq!(report.metric("b", "mean"), Some(&ReportValue::Float(0.1)));
    assert!(report.verdict("b").unwrap().is_true());
}

#[test]
fn mostly_same_default_threshold_passes_good_data() {
    let report = check_mostly_same(&good(), survey_checks::DEFAULT_THRESH).unwrap();
    assert!(report.flagged_columns().is_empty());
}

#[test]
fn mostly_same_rejects_threshold_out_of_range() {
    for thresh in [0.0, 1.0, -0.5, 1.5] {
        let err = check_mostly_same(&good(), thresh).unwrap_err();
        assert!(matches!(err, SurveyError::Range { name: "thresh", .. }));
    }
    let err = check_mostly_same(&good(), 1.5).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"thresh must be greater than 0 and less than 1, got 1.5"
    );
}

#[test]
fn mostly_same_all_null_column() {
    let series = Series::new("b".into(), &[None::<bool>, None, None]);
    let report = check_mostly_same(&series, 0.5).unwrap();
    let row = report.first().unwrap();
    assert_eq!(row.verdict, ReportValue::Bool(false));
    assert_eq!(report.first_metric("mean"), Some(&ReportValue::Null));
}

#[test]
fn outside_range_passes_good_data() {
    let report = check_outside_range(&good()).unwrap();
    assert!(report.flagged_columns().is_empty());
}

#[test]
fn outside_range_flags_low_and_high_values() {
    let low = df!(
        "b1" => [1i64, 0, 0, -1],
        "b2" => [false, true, false, true],
    )
    .unwrap();
    let high = df!(
        "b1" => [1i64, 0, 10, 1],
        "b2" => [false, true, false, true],
    )
    .unwrap();
    for df in [low, high] {
        let report = check_outside_range(&df).unwrap();
        assert_eq!(report.flagged_columns(), vec!["b1"]);
        let single = check_outside_range(&column(&df, "b1")).unwrap();
        assert!(single.first().unwrap().verdict.is_true());
    }
}

#[test]
fn report_materializes_as_frame() {
    let df = df!(
        "b1" => [true, true, true, false],
        "b2" => [false, true, false, true],
    )
    .unwrap();
    let frame = check_mostly_same(&df, 0.7).unwrap().to_frame().unwrap();
    let names: Vec<&str> = frame.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["column", "mostly_same", "thresh", "mean"]);
    let verdicts: Vec<Option<bool>> = frame
        .column("mostly_same")
        .unwrap()
        .as_materialized_series()
        .bool()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(verdicts, vec![Some(true), Some(false)]);
}

#[test]
fn unsigned_values_beyond_i64_are_not_dropped() {
    let wide = Series::new("u".into(), &[0u64, 1, u64::MAX]);
    let err = check_outside_range(&wide).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"input must be a single column or a table of columns: column 'u' holds integers outside the signed 64-bit range"
    );

    let narrow = Series::new("u".into(), &[0u64, 1, 7]);
    let report = check_outside_range(&narrow).unwrap();
    assert!(report.first().unwrap().verdict.is_true());
}

#[test]
fn mean_of_wide_integers_does_not_wrap() {
    let series = Series::new("w".into(), &[i64::MAX, i64::MAX]);
    let report = check_mostly_same(&series, 0.95).unwrap();
    let mean = report.first_metric("mean").and_then(ReportValue::as_f64).unwrap();
    assert!(mean > 1.0, "mean was {mean}");
    assert!(report.first().unwrap().verdict.is_true());
}
