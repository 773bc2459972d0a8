use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rdb_json::{convert, from_str, tokenize, JsonOptions, Scalar};

fn experiment(rows: usize) -> String {
    let mut rdb = String::from("#start data file format 4\n");
    rdb.push_str("#pair \"wall start date\" \"Mon Jan  1 10:00:00 2024\"\n");
    rdb.push_str("#pair \"problem\" \"korf100/12\"\n");
    rdb.push_str("#altcols \"incumbent\" \"incumbent num\" \"incumbent nodes expanded\" \"incumbent cost\"\n");
    for i in 0..rows {
        rdb.push_str(&format!(
            "#altrow \"incumbent\" {} {} {:.3}\n",
            i,
            i * 1531,
            100.0 - i as f64 * 0.25
        ));
    }
    rdb.push_str("#end data file format 4\n");
    rdb
}

fn benchmark_tokenize(c: &mut Criterion) {
    let line = r#"#altcols "incumbent" "incumbent num" "incumbent nodes expanded" "incumbent cost""#;
    c.bench_function("tokenize_quoted_line", |b| b.iter(|| tokenize(black_box(line))));
}

fn benchmark_coerce(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");
    for token in ["15065", "1.704103200e+09", "korf100/12"] {
        group.bench_with_input(BenchmarkId::from_parameter(token), token, |b, token| {
            b.iter(|| Scalar::coerce(black_box(token)))
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_experiment");
    for rows in [10, 100, 1000, 10000].iter() {
        let rdb = experiment(*rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rdb, |b, rdb| {
            b.iter(|| from_str(black_box(rdb)))
        });
    }
    group.finish();
}

fn benchmark_convert(c: &mut Criterion) {
    let rdb = experiment(1000);
    let compact = JsonOptions::new();
    let pretty = JsonOptions::pretty();

    c.bench_function("convert_compact_1000", |b| {
        b.iter(|| convert(black_box(&rdb), &compact))
    });
    c.bench_function("convert_pretty_1000", |b| {
        b.iter(|| convert(black_box(&rdb), &pretty))
    });
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_coerce,
    benchmark_parse,
    benchmark_convert
);
criterion_main!(benches);
