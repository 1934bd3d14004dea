//! Table benchmarks
//!
//! These benchmarks measure alphabet membership and word lookups.
//! Run with: `cargo bench --bench table_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dtk_util::{Alphabet, CasePolicy, SourceFile, WordMap};

/// Benchmark alphabet membership tests
fn bench_alphabet(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabet");
    let delimiters = Alphabet::new("[]{}(),.!~+-*/%&|^=<>\"`:;?");
    let probe = "a + b * (c - d) / e; x = [1, 2] ? y : z";
    group.throughput(Throughput::Elements(probe.chars().count() as u64));

    group.bench_function("contains", |b| {
        b.iter(|| {
            probe
                .chars()
                .filter(|&c| delimiters.contains(black_box(c)))
                .count()
        })
    });

    group.finish();
}

/// Benchmark word lookups under both case policies
fn bench_word_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_map");
    group.throughput(Throughput::Elements(1));

    let words = [
        "if", "else", "return", "while", "for", "each", "entry", "function", "break",
        "continue", "check",
    ];
    for policy in [CasePolicy::Sensitive, CasePolicy::Insensitive] {
        let map = WordMap::build(policy, words.iter().map(|w| (*w, 1u16)));
        for probe in ["while", "WHILE", "identifier"] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), probe),
                probe,
                |b, probe| b.iter(|| map.get(black_box(probe))),
            );
        }
    }

    group.finish();
}

/// Benchmark offset to line/column conversion
fn bench_source_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("source");
    let text = "merge out base.wad\n".repeat(10_000);
    let file = SourceFile::new("bench.txt", text.as_str());
    let len = text.len();

    group.bench_function("offset_to_line_col", |b| {
        let mut offset = 0usize;
        b.iter(|| {
            offset = (offset + 7919) % len;
            black_box(file.offset_to_line_col(offset))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_alphabet, bench_word_map, bench_source_lookup);
criterion_main!(benches);
