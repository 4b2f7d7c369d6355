//! Benchmarks for the index pipeline.
//!
//! Run with: cargo bench

use std::io::Cursor;

use criterion::{Criterion, criterion_group, criterion_main};

use bookdex::config::{RenderConfig, TableLayout};
use bookdex::export::{DocxExporter, Exporter};
use bookdex::import::read_outline_from;
use bookdex::transform::{build_document, sort_rows};
use bookdex::IndexRow;

const WORDS: &[&str] = &[
    "abacus", "Badger", "canal", "Delta", "ember", "Falcon", "garnet", "Harbor", "iris",
    "Juniper", "kettle", "Lantern", "meadow", "Nectar", "orbit", "Pebble", "quartz", "Raven",
    "saddle", "Thistle", "umber", "Velvet", "willow", "Xenon", "yarrow", "Zephyr",
];

/// A synthetic index of `n` rows with varied letters, pages and descriptions.
fn sample_rows(n: usize) -> Vec<IndexRow> {
    (0..n)
        .map(|i| {
            let word = WORDS[(i * 7) % WORDS.len()];
            let row = IndexRow::new(format!("{word} {i}"))
                .with_book(format!("Book {}", i % 5))
                .with_pages(if i % 3 == 0 {
                    format!("{}-{}", i, i + 2)
                } else {
                    i.to_string()
                });
            if i % 4 == 0 {
                row.with_description("Discussed at length, with figures.")
            } else {
                row
            }
        })
        .collect()
}

// ============================================================================
// Transform Benchmarks
// ============================================================================

fn bench_sort(c: &mut Criterion) {
    let rows = sample_rows(5_000);
    c.bench_function("sort_rows_5000", |b| {
        b.iter(|| sort_rows(rows.clone()));
    });
}

fn bench_build_document(c: &mut Criterion) {
    let rows = sample_rows(2_000);
    let split = RenderConfig::default();
    let combined = RenderConfig {
        layout: TableLayout::Combined,
        ..RenderConfig::default()
    };

    c.bench_function("build_document_split_2000", |b| {
        b.iter(|| build_document(rows.clone(), &split));
    });
    c.bench_function("build_document_combined_2000", |b| {
        b.iter(|| build_document(rows.clone(), &combined));
    });
}

// ============================================================================
// DOCX Benchmarks
// ============================================================================

fn bench_export_docx(c: &mut Criterion) {
    let doc = build_document(sample_rows(2_000), &RenderConfig::default());
    let exporter = DocxExporter::new();

    c.bench_function("export_docx_2000", |b| {
        b.iter(|| {
            let mut buf = Cursor::new(Vec::new());
            exporter.export(&doc, &mut buf).unwrap();
            buf
        });
    });
}

fn bench_read_outline(c: &mut Criterion) {
    let doc = build_document(sample_rows(2_000), &RenderConfig::default());
    let mut buf = Cursor::new(Vec::new());
    DocxExporter::new().export(&doc, &mut buf).unwrap();
    let bytes = buf.into_inner();

    c.bench_function("read_outline_2000", |b| {
        b.iter(|| read_outline_from(Cursor::new(bytes.as_slice())).unwrap());
    });
}

criterion_group!(
    benches,
    bench_sort,
    bench_build_document,
    bench_export_docx,
    bench_read_outline,
);

criterion_main!(benches);
