use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use huffman_text::huffman::{
    build_frequencies, build_frequencies_with, build_report, build_tree, decode, encode,
    generate_codes,
};
use huffman_text::Config;

const PROSE: &str = "the cold of space smote the unprotected tip of the planet, \
                     and he, being on that unprotected tip, received the full force of the blow. ";

fn generate_text(size: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let words: Vec<&str> = PROSE.split_whitespace().collect();
    let mut text = String::with_capacity(size + 16);
    while text.len() < size {
        text.push_str(words[rng.gen_range(0..words.len())]);
        text.push(' ');
    }
    text
}

fn bench_frequencies(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_frequencies");
    let parallel = Config::default().with_parallel_threshold(1);

    for size in [1 << 12, 1 << 16, 1 << 20] {
        let text = generate_text(size, 42);
        group.bench_with_input(BenchmarkId::new("sequential", size), &text, |b, text| {
            b.iter(|| build_frequencies(black_box(text)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &text, |b, text| {
            b.iter(|| build_frequencies_with(black_box(text), &parallel).unwrap())
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_codec");

    for size in [1 << 12, 1 << 16] {
        let text = generate_text(size, 7);
        let tree = build_tree(&build_frequencies(&text).unwrap()).unwrap();
        let table = generate_codes(&tree);
        let bits = encode(&text, &table).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", size), &text, |b, text| {
            b.iter(|| encode(black_box(text), &table).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &bits, |b, bits| {
            b.iter(|| decode(black_box(bits), &tree).unwrap())
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let text = generate_text(1 << 16, 3);
    c.bench_function("huffman_report_64k", |b| {
        b.iter(|| build_report(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_frequencies, bench_codec, bench_report);
criterion_main!(benches);
