//! Criterion benchmarks for Polyglex.
//!
//! Covers the hot paths of a run:
//! - Levenshtein distance
//! - BK-tree construction and search
//! - Sequential versus chunked parallel ingestion

use std::fmt::Write as _;
use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use polyglex::ingest::{IngestConfig, ParseConfig, ingest_str, parallel_ingest_str};
use polyglex::normalize::AsciiFolder;
use polyglex::similarity::BkTree;
use polyglex::util::levenshtein::levenshtein_distance;

/// Generate a deterministic vocabulary of `count` lowercase words.
fn generate_words(count: usize) -> Vec<String> {
    let syllables = ["ka", "re", "mi", "to", "su", "la", "ne", "po", "di", "ve"];
    (0..count)
        .map(|i| {
            let mut word = String::new();
            let mut n = i + 1;
            while n > 0 {
                word.push_str(syllables[n % syllables.len()]);
                n /= syllables.len();
            }
            word
        })
        .collect()
}

/// Build a Hunspell-style source from a vocabulary, with affixes and accents.
fn generate_source(words: &[String]) -> String {
    let mut text = String::new();
    writeln!(text, "{}", words.len()).unwrap();
    for (i, word) in words.iter().enumerate() {
        match i % 4 {
            0 => writeln!(text, "{word}/SM").unwrap(),
            1 => writeln!(text, "{}", word.replace('e', "é")).unwrap(),
            2 => writeln!(text, "{}", word.to_uppercase()).unwrap(),
            _ => writeln!(text, "{word}").unwrap(),
        }
    }
    text
}

fn bench_levenshtein(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein");

    group.bench_function("short_ascii", |b| {
        b.iter(|| levenshtein_distance(black_box("kitten"), black_box("sitting")))
    });

    group.bench_function("long_unicode", |b| {
        b.iter(|| {
            levenshtein_distance(
                black_box("çekoslovakyalılaştıramadıklarımızdanmışsınız"),
                black_box("cekoslovakyalilastiramadiklarimizdanmissiniz"),
            )
        })
    });

    group.finish();
}

fn bench_bktree(c: &mut Criterion) {
    let mut group = c.benchmark_group("bktree");
    group.sample_size(20);

    let words = generate_words(20_000);
    group.throughput(Throughput::Elements(words.len() as u64));
    group.bench_function("build_20k", |b| {
        b.iter(|| {
            let tree: BkTree = words.iter().collect();
            black_box(tree.len())
        })
    });

    let tree: BkTree = words.iter().collect();
    let queries: Vec<String> = words.iter().step_by(997).map(|w| format!("{w}x")).collect();
    group.throughput(Throughput::Elements(queries.len() as u64));
    for max_distance in [1, 2] {
        group.bench_function(format!("search_distance_{max_distance}"), |b| {
            b.iter(|| {
                for query in &queries {
                    black_box(tree.search(query, max_distance));
                }
            })
        });
    }

    group.finish();
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    group.sample_size(10);

    let words = generate_words(100_000);
    let source = generate_source(&words);
    let config = IngestConfig::new("xx").with_lengths(3, 12);
    group.throughput(Throughput::Elements(words.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let result = ingest_str(&source, Path::new("xx.dic"), &config, &AsciiFolder);
            black_box(result.total_valid)
        })
    });

    for workers in [2, 4, 8] {
        let parse = ParseConfig::new(workers, 1000);
        group.bench_function(format!("parallel_{workers}_workers"), |b| {
            b.iter(|| {
                let result = parallel_ingest_str(
                    &source,
                    Path::new("xx.dic"),
                    &config,
                    &parse,
                    &AsciiFolder,
                )
                .unwrap();
                black_box(result.total_valid)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_levenshtein, bench_bktree, bench_ingest);
criterion_main!(benches);
