//! Criterion benchmarks for the jsonschema2openapi-core translation pipeline.
//!
//! Fixtures are pre-parsed outside the benchmark loop where possible to
//! measure only the tree rewriting, not JSON parsing or file I/O.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::Value;
use std::fs;
use std::path::Path;

use jsonschema2openapi_core::{
    put_schema_into_openapi, translate_definitions, ConditionalDepth, ConvertOptions,
};

fn fixture_text(name: &str) -> String {
    let fixtures_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/fixtures");
    let path = Path::new(fixtures_dir).join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

fn load_definitions(name: &str) -> Value {
    let schema: Value = serde_json::from_str(&fixture_text(name))
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", name, e));
    schema["definitions"].clone()
}

fn bench_translate_events(c: &mut Criterion) {
    let definitions = load_definitions("events.schema.json");
    let options = ConvertOptions::default();

    c.bench_function("translate/events", |b| {
        b.iter(|| translate_definitions(black_box(definitions.clone()), black_box(&options)).unwrap())
    });
}

fn bench_translate_conditionals_full(c: &mut Criterion) {
    let definitions = load_definitions("data.schema.json");
    let options = ConvertOptions {
        conditionals: ConditionalDepth::Full,
        ..ConvertOptions::default()
    };

    c.bench_function("translate/data_full_depth", |b| {
        b.iter(|| translate_definitions(black_box(definitions.clone()), black_box(&options)).unwrap())
    });
}

fn bench_put_schema_into_openapi(c: &mut Criterion) {
    let schema = fixture_text("data.schema.json");
    let template = fixture_text("data.template.json");
    let options = ConvertOptions::default();

    c.bench_function("merge/data_end_to_end", |b| {
        b.iter(|| {
            put_schema_into_openapi(black_box(&schema), black_box(&template), black_box(&options))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_translate_events,
    bench_translate_conditionals_full,
    bench_put_schema_into_openapi,
);
criterion_main!(benches);
