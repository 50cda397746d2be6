//! Integration tests for aferir.

#![allow(clippy::cast_precision_loss, clippy::uninlined_format_args)]

use std::sync::Arc;

use aferir::{
    scoring::Dimension, Assessor, CellValue, Column, ColumnKind, Score, ScoringProfile, Table,
};
use arrow::{
    array::{Float64Array, Int16Array, Int64Array, RecordBatch, StringArray, TimestampSecondArray},
    datatypes::{DataType, Field, Schema, TimeUnit},
};
use chrono::{Duration, TimeZone, Utc};
use parquet::arrow::ArrowWriter;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
}

/// The three-column scenario: a clean numeric column, an all-missing text
/// column, and a fresh unique datetime column.
fn three_column_table() -> Table {
    let now = fixed_now();

    let amounts: Vec<Option<f64>> = (1..=10).map(|i| Some(f64::from(i) * 100.0)).collect();
    let missing: Vec<Option<&str>> = vec![None; 10];
    let stamps: Vec<Option<chrono::DateTime<Utc>>> = (1..=10)
        .map(|i: i64| Some(now - Duration::days(i * 30)))
        .collect();

    Table::new(vec![
        Column::new(
            "amount",
            ColumnKind::Numeric,
            amounts.into_iter().map(|v| v.map(CellValue::Number)).collect(),
        ),
        Column::new(
            "notes",
            ColumnKind::Other,
            missing
                .into_iter()
                .map(|v| v.map(|s| CellValue::Text(s.to_string())))
                .collect(),
        ),
        Column::new(
            "recorded_at",
            ColumnKind::Datetime,
            stamps
                .into_iter()
                .map(|v| v.map(CellValue::Timestamp))
                .collect(),
        ),
    ])
}

#[test]
fn test_end_to_end_weighted() {
    let table = three_column_table();
    let report = Assessor::weighted().unwrap().assess(&table);

    assert_eq!(report.rows.len(), 3);

    let amount = report.row("amount").unwrap();
    assert_eq!(amount.score(Dimension::Completeness), Some(Score::Value(1.0)));
    assert_eq!(
        amount.score(Dimension::BusinessRuleCompliance),
        Some(Score::Value(1.0))
    );
    assert_eq!(amount.dqs, Score::Value(1.0));
    assert_eq!(amount.label, "High Quality");

    let notes = report.row("notes").unwrap();
    assert_eq!(notes.score(Dimension::Completeness), Some(Score::Value(0.2)));
    assert_eq!(
        notes.score(Dimension::BusinessRuleCompliance),
        Some(Score::NotApplicable)
    );

    assert!(report.overall_dqs.is_applicable());
}

#[test]
fn test_end_to_end_carbon() {
    let table = three_column_table();
    let report = Assessor::carbon()
        .unwrap()
        .with_now(fixed_now())
        .assess(&table);

    let recorded = report.row("recorded_at").unwrap();
    // All ten stamps are within the past year
    assert_eq!(recorded.score(Dimension::Timeliness), Some(Score::Value(1.0)));
    assert_eq!(recorded.score(Dimension::Comparability), Some(Score::Value(1.0)));

    let carbon = report.carbon.as_ref().unwrap();
    // The all-missing notes column drags mean verifiability below 0.95
    assert_eq!(carbon.pcaf_score, 2);
    assert!(carbon.improvement_areas.contains(&"notes".to_string()));
    // Only "amount" is numeric: estimate is its mean, 550
    assert_eq!(carbon.emissions_estimate, Some(550.0));
}

#[test]
fn test_every_score_in_range() {
    let table = three_column_table();
    for assessor in [Assessor::weighted().unwrap(), Assessor::carbon().unwrap()] {
        let report = assessor.assess(&table);
        for row in &report.rows {
            for entry in &row.scores {
                if let Some(v) = entry.score.value() {
                    assert!((0.0..=1.0).contains(&v), "{}: {}", entry.dimension, v);
                }
            }
            if let Some(dqs) = row.dqs.value() {
                assert!((0.0..=1.0).contains(&dqs));
            }
        }
    }
}

#[test]
fn test_assess_from_record_batch() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("supplier", DataType::Utf8, true),
        Field::new("emissions", DataType::Float64, true),
        Field::new(
            "reported_at",
            DataType::Timestamp(TimeUnit::Second, None),
            true,
        ),
    ]));

    let now = fixed_now().timestamp();
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3, 4])),
            Arc::new(StringArray::from(vec![
                Some("Acme"),
                Some("acme"),
                None,
                Some("Globex"),
            ])),
            Arc::new(Float64Array::from(vec![
                Some(120.5),
                Some(80.0),
                Some(-3.0),
                None,
            ])),
            Arc::new(TimestampSecondArray::from(vec![
                Some(now - 86_400),
                Some(now - 10 * 86_400),
                None,
                Some(now - 400 * 86_400),
            ])),
        ],
    )
    .unwrap();

    let table = Table::from_batch(&batch).unwrap();
    let report = Assessor::carbon()
        .unwrap()
        .with_now(fixed_now())
        .assess(&table);

    let emissions = report.row("emissions").unwrap();
    // One negative of four values
    assert_eq!(emissions.score(Dimension::Accuracy), Some(Score::Value(0.75)));
    assert_eq!(emissions.score(Dimension::Verifiability), Some(Score::Value(0.75)));

    let reported = report.row("reported_at").unwrap();
    // Two fresh stamps out of four cells (one missing, one stale)
    assert_eq!(reported.score(Dimension::Timeliness), Some(Score::Value(0.5)));

    let supplier = report.row("supplier").unwrap();
    assert_eq!(supplier.score(Dimension::Comparability), Some(Score::Value(0.7)));
}

#[test]
fn test_csv_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(
        &path,
        "id,name,value\n1,alpha,10.5\n2,beta,20.0\n3,,30.5\n4,delta,\n",
    )
    .unwrap();

    let table = Table::from_path(&path).unwrap();
    assert_eq!(table.num_columns(), 3);
    assert_eq!(table.row_count(), 4);

    let report = Assessor::weighted().unwrap().assess(&table);
    assert_eq!(report.rows.len(), 3);

    let id = report.row("id").unwrap();
    assert_eq!(id.dqs, Score::Value(1.0));

    // value has one missing cell of four: ratio 0.75 buckets to 0.5
    let value = report.row("value").unwrap();
    assert_eq!(value.score(Dimension::Completeness), Some(Score::Value(0.5)));
}

#[test]
fn test_parquet_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("qty", DataType::Int16, false),
        Field::new("emissions", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![
            Arc::new(Int16Array::from(vec![5i16, 10, 15, 20])),
            Arc::new(Float64Array::from(vec![
                Some(1.5),
                None,
                Some(2.5),
                Some(3.5),
            ])),
        ],
    )
    .unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = Table::from_path(&path).unwrap();
    assert_eq!(table.num_columns(), 2);
    assert_eq!(table.row_count(), 4);

    let qty = table.column("qty").unwrap();
    assert_eq!(qty.kind(), ColumnKind::Numeric);
    assert_eq!(qty.numbers().collect::<Vec<_>>(), vec![5.0, 10.0, 15.0, 20.0]);

    let report = Assessor::weighted().unwrap().assess(&table);
    // Narrow integer widths still score as in-range numbers
    let qty_row = report.row("qty").unwrap();
    assert_eq!(
        qty_row.score(Dimension::BusinessRuleCompliance),
        Some(Score::Value(1.0))
    );
    assert_eq!(qty_row.dqs, Score::Value(1.0));
}

#[test]
fn test_jsonl_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"supplier\":\"acme\",\"scope1\":10.5}\n",
            "{\"supplier\":\"globex\",\"scope1\":20.0}\n",
            "{\"supplier\":null,\"scope1\":30.0}\n",
        ),
    )
    .unwrap();

    let table = Table::from_path(&path).unwrap();
    assert_eq!(table.num_columns(), 2);
    assert_eq!(table.row_count(), 3);

    let supplier = table.column("supplier").unwrap();
    assert_eq!(supplier.missing_count(), 1);
    let scope1 = table.column("scope1").unwrap();
    assert_eq!(scope1.kind(), ColumnKind::Numeric);

    let report = Assessor::carbon().unwrap().assess(&table);
    let carbon = report.carbon.as_ref().unwrap();
    // Mean of scope1: (10.5 + 20 + 30) / 3 rounded to 2 decimals
    assert_eq!(carbon.emissions_estimate, Some(20.17));
    assert!(carbon.improvement_areas.contains(&"supplier".to_string()));
}

#[test]
fn test_custom_pattern_and_bounds() {
    let table = Table::from_csv_str("code,qty\nAB12,5\nCD34,50\nbad!,500\n").unwrap();

    let profile = ScoringProfile::weighted()
        .with_pattern(r"[A-Z]{2}\d{2}")
        .with_bounds(0.0, 100.0);
    let report = Assessor::from_profile(profile).unwrap().assess(&table);

    let code = report.row("code").unwrap();
    // 2 of 3 match: ratio below 0.75 buckets to 0.4
    assert_eq!(code.score(Dimension::FormatValidity), Some(Score::Value(0.4)));

    let qty = report.row("qty").unwrap();
    // 2 of 3 in bounds
    assert_eq!(
        qty.score(Dimension::BusinessRuleCompliance),
        Some(Score::Value(0.4))
    );
}

#[test]
fn test_json_output_na_mapping() {
    let profile = ScoringProfile::weighted();
    let table = Table::new(vec![Column::new(
        "words",
        ColumnKind::Other,
        vec![Some(CellValue::Text("x".into()))],
    )]);

    let report = Assessor::from_profile(profile).unwrap().assess(&table);
    let json = report.to_json_value();

    let record = &json["report"][0];
    assert_eq!(record["Business Rule Compliance"], serde_json::json!("N/A"));
    assert_eq!(record["Column"], serde_json::json!("words"));
    assert!(json["summary"]["overall_dqs"].is_number());
}

#[test]
fn test_empty_table_is_total() {
    for assessor in [Assessor::weighted().unwrap(), Assessor::carbon().unwrap()] {
        let report = assessor.assess(&Table::empty());
        assert!(report.rows.is_empty());
        assert_eq!(report.overall_dqs, Score::NotApplicable);
        assert_eq!(report.overall_label, "N/A");
    }
}
