//! Tokenizer and parser throughput benchmarks
//!
//! Run benchmarks: `cargo bench --bench parse_throughput`
//!
//! Compare the stages:
//! ```
//! cargo bench --bench parse_throughput -- "tokenize"
//! cargo bench --bench parse_throughput -- "parse"
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quire::Parser;
use quire::xpath1::tokenize;
use std::collections::HashMap;
use std::hint::black_box;

/// Expressions of the shape found in stylesheet `select` and `test` attributes.
const EXPRESSIONS: &[(&str, &str)] = &[
    ("name", "para"),
    ("path", "/catalog/book[@lang = 'en']/title"),
    ("predicates", "//item[price > 10 and qty mod 2 = 0][position() < last()]"),
    ("functions", "concat(substring-before($s, ':'), ' - ', normalize-space(.))"),
    ("arithmetic", "(1 + 2) * 3 div 4 - -5 mod 6"),
    ("qualified", "fo:root/fo:page-sequence/fo:flow//fo:block[@id]"),
];

fn namespaces() -> HashMap<String, String> {
    HashMap::from([(
        "fo".to_string(),
        "http://www.w3.org/1999/XSL/Format".to_string(),
    )])
}

/// Benchmark the tokenizer alone
fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for (label, input) in EXPRESSIONS {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), input, |b, input| {
            b.iter(|| tokenize(black_box(input)))
        });
    }

    group.finish();
}

/// Benchmark full parses with a reused parser
fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let resolver = namespaces();
    let mut parser = Parser::new();

    for (label, input) in EXPRESSIONS {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), input, |b, input| {
            b.iter(|| {
                parser
                    .parse(black_box(input), Some(&resolver))
                    .expect("benchmark expression should parse")
            })
        });
    }

    group.finish();
}

/// Benchmark rejection, which drains the string arena
fn benchmark_rejection(c: &mut Criterion) {
    let mut parser = Parser::new();
    let input = "concat('a', 'b', 'c', 'd' 'e')";

    c.bench_function("parse_rejected", |b| {
        b.iter(|| parser.parse(black_box(input), None).is_err())
    });
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_parse,
    benchmark_rejection
);
criterion_main!(benches);
