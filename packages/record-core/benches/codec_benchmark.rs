//! Benchmark for record validation and binary encoding.

use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use std::hint::black_box;
use std::io::Cursor;

use record_core::{Column, ColumnType, Record, State, TableSchema};

/// Creates a schema with a key column and `width` text columns.
fn create_test_schema(width: usize) -> TableSchema {
    let mut columns = vec![Column::key("id", ColumnType::BigInt)];
    for i in 0..width {
        columns.push(Column::new(format!("c{}", i), ColumnType::Varchar(64)));
    }
    TableSchema::create("bench", columns).unwrap()
}

fn create_test_values(width: usize) -> HashMap<String, String> {
    let mut values: HashMap<String, String> = (0..width)
        .map(|i| (format!("c{}", i), format!("value number {}", i)))
        .collect();
    values.insert("id".to_string(), "123456789".to_string());
    values
}

/// Benchmark record construction with validation.
fn bench_construct(c: &mut Criterion) {
    let schema = create_test_schema(16);
    let values = create_test_values(16);

    c.bench_function("construct_16_columns", |b| {
        b.iter(|| {
            let record = Record::new(black_box(&values), &schema, State::Inserting).unwrap();
            black_box(record.len());
        });
    });
}

/// Benchmark writing a record to an in-memory stream.
fn bench_write(c: &mut Criterion) {
    let schema = create_test_schema(16);
    let record = Record::new(&create_test_values(16), &schema, State::Loaded).unwrap();
    let mut buffer = Vec::with_capacity(record.size() as usize);

    c.bench_function("write_16_columns", |b| {
        b.iter(|| {
            buffer.clear();
            record.write(black_box(&mut buffer)).unwrap();
            black_box(buffer.len());
        });
    });
}

/// Benchmark reading a record back from an in-memory stream.
fn bench_read(c: &mut Criterion) {
    let schema = create_test_schema(16);
    let record = Record::new(&create_test_values(16), &schema, State::Loaded).unwrap();
    let bytes = record.encode().unwrap();

    c.bench_function("read_16_columns", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(bytes.as_slice()));
            let restored = Record::read_from(&mut cursor).unwrap();
            black_box(restored.len());
        });
    });
}

criterion_group!(benches, bench_construct, bench_write, bench_read);
criterion_main!(benches);
