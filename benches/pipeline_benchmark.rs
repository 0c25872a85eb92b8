use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sentiscore::{encode, tokenize, EncodeOptions, Metadata};

fn bench_metadata() -> Metadata {
    let words = "the a and of to is it in this that was as for with movie \
                 film but on not you are his have be he one all at by an \
                 they who so from like her just or about out has what some \
                 good more when very up no time even my would which story";
    let word_index: HashMap<String, i64> = words
        .split_whitespace()
        .enumerate()
        .map(|(i, w)| (w.to_string(), i as i64 + 1))
        .collect();
    Metadata {
        word_index,
        index_from: 3,
        vocabulary_size: 20000,
        max_len: 100,
    }
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tokenize");
    group.sample_size(50);

    group.bench_function("short_remark", |b| {
        b.iter(|| tokenize(black_box("This is a great movie!")))
    });

    group.bench_function("long_remark", |b| {
        b.iter(|| {
            tokenize(black_box(
                "The story starts slow, but the acting is very good and by \
                 the time it gets going you are all in. Not one scene felt \
                 out of place, and even the quiet moments have some weight \
                 to them. Would watch it again, no question about it.",
            ))
        })
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let metadata = bench_metadata();
    let mut group = c.benchmark_group("Encode");
    group.sample_size(50);

    let short = tokenize("this is a good movie");
    group.bench_function("short_sequence", |b| {
        b.iter(|| encode(black_box(&short), &metadata, EncodeOptions::default()))
    });

    let long_text = "this movie was very good and the story had some time to breathe ".repeat(20);
    let long = tokenize(&long_text);
    group.bench_function("truncated_sequence", |b| {
        b.iter(|| encode(black_box(&long), &metadata, EncodeOptions::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_encode);
criterion_main!(benches);
