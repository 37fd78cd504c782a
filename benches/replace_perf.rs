//! Performance benchmarks for emojidb.
//!
//! Run with: `cargo bench --bench replace_perf`

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::collections::HashMap;
use tempfile::TempDir;

use emojidb::convert::convert;
use emojidb::model::AliasRow;
use emojidb::replace::replace_aliases;
use emojidb::storage::Storage;

const ALIASES: &[(&str, &str)] = &[
    ("grinning", "😀"),
    ("smiley", "😃"),
    ("smile", "😄"),
    ("grin", "😁"),
    ("joy", "😂"),
    ("wink", "😉"),
    ("heart", "❤️"),
    ("rocket", "🚀"),
];

fn sample_rows() -> Vec<AliasRow> {
    ALIASES
        .iter()
        .map(|(alias, emoji)| AliasRow {
            alias: (*alias).to_string(),
            emoji: (*emoji).to_string(),
        })
        .collect()
}

/// Text with one alias roughly every ten words.
fn dense_text(repeats: usize) -> String {
    let mut text = String::new();
    for i in 0..repeats {
        let (alias, _) = ALIASES[i % ALIASES.len()];
        text.push_str("lorem ipsum dolor sit amet consectetur adipiscing elit sed do :");
        text.push_str(alias);
        text.push_str(": ");
    }
    text
}

fn plain_text(repeats: usize) -> String {
    "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod ".repeat(repeats)
}

fn bench_replace_no_colons(c: &mut Criterion) {
    let map: HashMap<String, String> = sample_rows()
        .into_iter()
        .map(|row| (row.alias, row.emoji))
        .collect();
    let resolver = |alias: &str| map.get(alias).cloned();
    let text = plain_text(200);

    let mut group = c.benchmark_group("replace_no_colons");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("fast_path", |b| {
        b.iter(|| {
            let out = replace_aliases(&resolver, black_box(&text)).unwrap();
            black_box(out.len());
        });
    });
    group.finish();
}

fn bench_replace_dense(c: &mut Criterion) {
    let map: HashMap<String, String> = sample_rows()
        .into_iter()
        .map(|row| (row.alias, row.emoji))
        .collect();
    let resolver = |alias: &str| map.get(alias).cloned();
    let text = dense_text(200);

    let mut group = c.benchmark_group("replace_dense");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("map_resolver", |b| {
        b.iter(|| {
            let out = replace_aliases(&resolver, black_box(&text)).unwrap();
            black_box(out.len());
        });
    });
    group.finish();
}

fn bench_replace_through_storage(c: &mut Criterion) {
    let mut storage = Storage::open_memory().expect("open in-memory store");
    storage.insert_rows(&sample_rows()).expect("seed rows");
    let text = dense_text(50);

    let mut group = c.benchmark_group("replace_storage");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("db_resolver", |b| {
        b.iter(|| {
            let out = replace_aliases(&storage, black_box(&text)).unwrap();
            black_box(out.len());
        });
    });
    group.finish();
}

fn bench_convert_corpus(c: &mut Criterion) {
    // A synthetic corpus in the shape of the real gemoji export.
    let mut records = Vec::new();
    for i in 0..1_000 {
        records.push(serde_json::json!({
            "emoji": "😀",
            "aliases": [format!("alias_{i}"), format!("alias_{i}_long_variant")],
        }));
    }
    let corpus = serde_json::to_string(&records).expect("serialize corpus");

    let dir = TempDir::new().expect("create temp dir");
    let source = dir.path().join("gemoji.json");
    std::fs::write(&source, &corpus).expect("write corpus");

    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Elements(1_000));
    group.sample_size(20);
    group.bench_function("corpus_1k", |b| {
        b.iter(|| {
            let dest = dir.path().join("bench.db");
            let report = convert(&source, &dest).unwrap();
            black_box(report.aliases_inserted);
        });
    });
    group.finish();
}

criterion_group!(
    name = replace_benches;
    config = Criterion::default().significance_level(0.05);
    targets =
        bench_replace_no_colons,
        bench_replace_dense,
        bench_replace_through_storage
);

criterion_group!(
    name = convert_benches;
    config = Criterion::default().significance_level(0.05);
    targets = bench_convert_corpus
);

criterion_main!(replace_benches, convert_benches);
