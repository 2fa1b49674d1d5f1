//! Benchmarks for the statblock pipeline.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use statblock::parser::classify;
use statblock::{parse_all, parse_statblock, Converter, FormatRegistry, SchemaValidator};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let goblin = load_fixture("goblin_assassin.txt");
    let bestiary = load_fixture("bestiary.txt");

    group.bench_function("classify_lines", |b| {
        b.iter(|| goblin.lines().map(classify).count())
    });

    group.bench_function("parse_statblock", |b| {
        b.iter(|| parse_statblock(black_box(&goblin)))
    });

    group.bench_function("parse_all_bestiary", |b| {
        b.iter(|| parse_all(black_box(&bestiary)))
    });

    group.finish();
}

// -- Conversion benchmarks --

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    let ogre = load_fixture("ogre_juggernaut.txt");
    let plain = Converter::without_validation(FormatRegistry::with_defaults());
    let checked = Converter::with_defaults().unwrap();

    for target in ["JSON", "YAML", "Markdown"] {
        group.bench_function(format!("text_to_{}", target.to_lowercase()), |b| {
            b.iter(|| plain.convert(black_box(&ogre), "Statblock Text", target).unwrap())
        });
    }

    group.bench_function("text_to_json_validated", |b| {
        b.iter(|| {
            checked
                .convert_with_report(black_box(&ogre), "Automagic", "JSON")
                .unwrap()
        })
    });

    group.finish();
}

// -- Validation benchmarks --

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    let validator = SchemaValidator::bundled().unwrap();
    let statblock = parse_statblock(&load_fixture("goblin_assassin.txt"));
    let json = serde_json::to_string(&statblock).unwrap();

    group.bench_function("validate_json", |b| {
        b.iter(|| validator.validate_json(black_box(&json)))
    });

    group.bench_function("check_statblock", |b| {
        b.iter(|| statblock::check_statblock(black_box(&statblock)))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_conversion, bench_validation);
criterion_main!(benches);
