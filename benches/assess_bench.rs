//! Benchmarks for dataset assessment.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use std::sync::Arc;

use aferir::{Assessor, Table};
use arrow::{
    array::{Float64Array, Int32Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn create_table(rows: usize) -> Table {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int32, false),
        Field::new("name", DataType::Utf8, true),
        Field::new("value", DataType::Float64, true),
    ]));

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let ids: Vec<i32> = (0..rows as i32).collect();
    let names: Vec<Option<String>> = ids
        .iter()
        .map(|i| (i % 10 != 0).then(|| format!("item_{}", i % 50)))
        .collect();
    #[allow(clippy::cast_lossless)]
    let values: Vec<Option<f64>> = ids
        .iter()
        .map(|i| (i % 7 != 0).then(|| *i as f64 * 1.5 - 10.0))
        .collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from(ids)),
            Arc::new(StringArray::from(names)),
            Arc::new(Float64Array::from(values)),
        ],
    )
    .expect("Failed to create batch");

    Table::from_batch(&batch).expect("Failed to create table")
}

fn bench_assess_weighted(c: &mut Criterion) {
    let mut group = c.benchmark_group("assess_weighted");
    let assessor = Assessor::weighted().unwrap();

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let table = create_table(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| assessor.assess(black_box(table)));
        });
    }

    group.finish();
}

fn bench_assess_carbon(c: &mut Criterion) {
    let mut group = c.benchmark_group("assess_carbon");
    let assessor = Assessor::carbon().unwrap();

    for size in [100, 1_000, 10_000].iter() {
        let table = create_table(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| assessor.assess(black_box(table)));
        });
    }

    group.finish();
}

fn bench_table_from_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_from_batch");

    for size in [1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| create_table(black_box(size)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_assess_weighted,
    bench_assess_carbon,
    bench_table_from_batch
);
criterion_main!(benches);
