//! Tests for uniqueness checks.

use polars::df;
use polars::prelude::*;
use survey_checks::checks::unique::{check_uniqueness, validate_unique_kind};
use survey_checks::{ReportValue, SurveyError};

fn dates(name: &str, days: &[i32]) -> Column {
    Series::new(name.into(), days)
        .cast(&DataType::Date)
        .unwrap()
        .into()
}

fn good() -> DataFrame {
    DataFrame::new(vec![
        Series::new("g1".into(), &["foo", "bar", "baz", "boo"]).into(),
        Series::new("g2".into(), &[0i64, 1, 2, 4]).into(),
        dates("g3", &[17167, 17532, 17897, 18262]),
    ])
    .unwrap()
}

#[test]
fn validate_accepts_text_integers_and_dates() {
    assert!(validate_unique_kind(&good()).is_ok());
}

#[test]
fn validate_accepts_datetimes() {
    let series = Series::new("ts".into(), &[0i64, 1_000])
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    assert!(validate_unique_kind(&series).is_ok());
}

#[test]
fn validate_rejects_floats() {
    let df = df!(
        "b1" => [0.0f64, 1.0, 2.0, 4.0],
        "b2" => ["foo", "bar", "baz", "boo"],
    )
    .unwrap();
    let err = validate_unique_kind(&df).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"unique columns must be of kind text, integer, date or datetime; column 'b1' has kind float"
    );
}

#[test]
fn uniqueness_passes_good_data() {
    let report = check_uniqueness(&good()).unwrap();
    assert_eq!(report.title, "dupes_present");
    assert_eq!(report.metrics, vec!["dupe_count", "prop_dupe"]);
    assert!(report.flagged_columns().is_empty());
    for row in &report.rows {
        assert_eq!(row.metrics[0], ReportValue::Int(0));
    }
}

#[test]
fn uniqueness_counts_duplicates() {
    let df = df!(
        "b1" => [0i64, 1, 0, 1],
        "b2" => ["foo", "bar", "baz", "boo"],
    )
    .unwrap();
    let report = check_uniqueness(&df).unwrap();
    assert_eq!(report.flagged_columns(), vec!["b1"]);
    assert_eq!(report.metric("b1", "dupe_count"), Some(&ReportValue::Int(2)));
    assert_eq!(report.metric("b1", "prop_dupe"), Some(&ReportValue::Float(0.5)));
    assert_eq!(report.metric("b2", "dupe_count"), Some(&ReportValue::Int(0)));

    let series = df.column("b1").unwrap().as_materialized_series().clone();
    let single = check_uniqueness(&series).unwrap();
    assert!(single.first().unwrap().verdict.is_true());
    assert_eq!(single.first_metric("dupe_count"), Some(&ReportValue::Int(2)));
}

#[test]
fn uniqueness_counts_date_duplicates() {
    let df = DataFrame::new(vec![dates("d", &[1, 2, 2])]).unwrap();
    let report = check_uniqueness(&df).unwrap();
    assert_eq!(report.metric("d", "dupe_count"), Some(&ReportValue::Int(1)));
}

#[test]
fn uniqueness_rejects_absent_values() {
    let df = df!(
        "id" => [Some("a"), None, Some("c")],
        "n" => [1i64, 2, 3],
        "code" => [Some(1i64), Some(2), None],
    )
    .unwrap();
    let err = check_uniqueness(&df).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"columns with unique data should not contain nulls: id, code"
    );
    assert!(matches!(err, SurveyError::NullPresent { ref columns } if columns.len() == 2));
}

#[test]
fn uniqueness_checks_kind_before_nulls() {
    let df = df!("f" => [Some(1.0f64), None]).unwrap();
    assert!(matches!(
        check_uniqueness(&df),
        Err(SurveyError::Kind { .. })
    ));
}
