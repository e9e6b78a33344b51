//! Segment benchmark: Measure sentence-splitting throughput.
//!
//! The segmenter reruns on every growth of the displayed text, so it
//! has to stay cheap at response-sized inputs (a few KB).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unfurl::segment::split_sentences;

fn response_text(sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("Sentence number {i} carries a little bit of payload. "))
        .collect()
}

fn split_short_response(c: &mut Criterion) {
    let text = response_text(10);
    c.bench_function("split_10_sentences", |b| {
        b.iter(|| split_sentences(black_box(&text)))
    });
}

fn split_long_response(c: &mut Criterion) {
    let text = response_text(200);
    c.bench_function("split_200_sentences", |b| {
        b.iter(|| split_sentences(black_box(&text)))
    });
}

fn split_no_terminators(c: &mut Criterion) {
    let text = "word ".repeat(1000);
    c.bench_function("split_no_terminators", |b| {
        b.iter(|| split_sentences(black_box(&text)))
    });
}

criterion_group!(
    benches,
    split_short_response,
    split_long_response,
    split_no_terminators,
);
criterion_main!(benches);
