//! Tests for the whole-table audit.

use polars::df;
use polars::prelude::*;
use survey_checks::{
    ColumnKind, Finding, ReportValue, Severity, SurveyError, SurveyOptions, audit_frame,
};

fn sample() -> DataFrame {
    df!(
        "id" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10],
        "name" => ["Nick", "Gina", "Rob", "Adam", "Hanna", "Susan", "Quentin", "Caitlyn", "Matt", "Nick"],
        "state" => ["WA", "OR", "WA", "ID", "WA", "Null", "WA", "ID", "WA", "WA"],
        "app_inst" => [true, true, false, true, true, false, true, true, true, true],
        "lylty" => [0i64, 1, 0, 1, 1, 0, 1, 0, 1, 0],
        "spend" => [Some(0.0f64), None, Some(10.0), Some(150.0), Some(12.0), Some(0.0), None, Some(8.0), Some(50.0), Some(-10.0)],
    )
    .unwrap()
}

#[test]
fn audit_sample_table() {
    let options = SurveyOptions::new().with_thresh(0.75);
    let report = audit_frame(&sample(), &options).unwrap();
    assert_eq!(report.row_count, 10);
    assert_eq!(report.columns.len(), 6);

    let flagged: Vec<&str> = report
        .flagged()
        .iter()
        .map(|audit| audit.column.as_str())
        .collect();
    assert_eq!(flagged, vec!["name", "state", "app_inst", "spend"]);

    let id = report.column("id").unwrap();
    assert_eq!(id.kind, ColumnKind::Integer);
    assert_eq!(id.findings, vec![Finding::AllUnique]);
    assert!(!id.is_flagged());

    let name = report.column("name").unwrap();
    assert_eq!(
        name.findings,
        vec![Finding::Duplicates {
            dupe_count: 1,
            prop_dupe: 0.1
        }]
    );

    let state = report.column("state").unwrap();
    assert!(state.has("fuzzy_nulls_present"));
    assert!(!state.has("mostly_same"));

    let app_inst = report.column("app_inst").unwrap();
    assert_eq!(
        app_inst.findings,
        vec![Finding::MostlySame {
            most_common: ReportValue::Bool(true),
            prop: 0.8
        }]
    );

    let lylty = report.column("lylty").unwrap();
    assert!(lylty.findings.is_empty());

    let spend = report.column("spend").unwrap();
    assert_eq!(spend.kind, ColumnKind::Float);
    assert_eq!(
        spend.findings,
        vec![Finding::NullsPresent {
            null_count: 2,
            prop_null: 0.2
        }]
    );
}

#[test]
fn audit_default_threshold_is_quieter() {
    let report = audit_frame(&sample(), &SurveyOptions::default()).unwrap();
    let flagged: Vec<&str> = report
        .flagged()
        .iter()
        .map(|audit| audit.column.as_str())
        .collect();
    assert_eq!(flagged, vec!["state", "spend"]);
}

#[test]
fn audit_constant_columns() {
    let df = df!(
        "flag" => [1i64, 1, 1],
        "code" => ["x", "x", "x"],
        "seven" => [7i64, 7, 7],
    )
    .unwrap();
    let report = audit_frame(&df, &SurveyOptions::default()).unwrap();
    for audit in &report.columns {
        assert_eq!(audit.findings, vec![Finding::Constant], "{}", audit.column);
    }
}

#[test]
fn audit_two_valued_integer_outside_range() {
    let df = df!("grade" => [1i64, 2, 2, 1]).unwrap();
    let report = audit_frame(&df, &SurveyOptions::default()).unwrap();
    let grade = report.column("grade").unwrap();
    assert_eq!(
        grade.findings,
        vec![Finding::OutsideBinaryRange {
            min: Some(1),
            max: Some(2)
        }]
    );
}

#[test]
fn audit_extra_fuzzy_tokens() {
    let df = df!("state" => ["WA", "n/a", "OR", "ID"]).unwrap();
    let plain = audit_frame(&df, &SurveyOptions::default()).unwrap();
    assert!(plain.is_clean());

    let options = SurveyOptions::default().with_fuzzy_null("n/a");
    let report = audit_frame(&df, &options).unwrap();
    assert_eq!(
        report.column("state").unwrap().findings[0],
        Finding::FuzzyNullsPresent {
            fuzzy_null_count: 1,
            prop_fuzzy_null: 0.25
        }
    );
}

#[test]
fn audit_rejects_bad_threshold() {
    let options = SurveyOptions::default().with_thresh(1.0);
    let err = audit_frame(&sample(), &options).unwrap_err();
    assert!(matches!(err, SurveyError::Range { .. }));
}

#[test]
fn findings_serialize_with_tag() {
    let finding = Finding::NullsPresent {
        null_count: 2,
        prop_null: 0.2,
    };
    assert_eq!(finding.severity(), Severity::Warning);
    insta::assert_json_snapshot!(finding, @r#"
    {
      "finding": "nulls_present",
      "null_count": 2,
      "prop_null": 0.2
    }
    "#);
}
