use citytz_core::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;

const COUNTRIES: &[(&str, &str, &str, &str)] = &[
    ("United States of America", "US", "USA", "America/Chicago"),
    ("Germany", "DE", "DEU", "Europe/Berlin"),
    ("Japan", "JP", "JPN", "Asia/Tokyo"),
    ("Brazil", "BR", "BRA", "America/Sao_Paulo"),
];

fn synthetic_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let (country, iso2, iso3, tz) = COUNTRIES[i % COUNTRIES.len()];
            Record {
                city: format!("City {i}"),
                city_ascii: format!("City {i}"),
                province: format!("Province {}", i % 50),
                country: country.to_string(),
                iso2: iso2.to_string(),
                iso3: iso3.to_string(),
                timezone: tz.to_string(),
                pop: (i * 100) as f64,
                ..Default::default()
            }
        })
        .collect()
}

fn engine(count: usize) -> SearchEngine {
    SearchEngine::new(Arc::new(Dataset::from_records(synthetic_records(count))))
}

fn bench_lookup_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_exact");
    let engine = engine(10_000);

    group.bench_function("cold", |b| {
        b.iter(|| {
            engine.clear_cache();
            engine.lookup_exact(black_box("City 9999")).unwrap()
        })
    });
    group.bench_function("cached", |b| {
        engine.lookup_exact("City 9999").unwrap();
        b.iter(|| engine.lookup_exact(black_box("City 9999")).unwrap())
    });
    group.finish();
}

fn bench_scans(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    for size in [1_000usize, 10_000] {
        let engine = engine(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("find_partial", size), &size, |b, _| {
            b.iter(|| engine.find_partial(black_box("province 7 germany")).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("find_by_country_code", size), &size, |b, _| {
            b.iter(|| engine.find_by_country_code(black_box("jpn")).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("search", size), &size, |b, _| {
            b.iter(|| {
                engine
                    .search(black_box("city 12"), SearchOptions::new())
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    c.bench_function("validate_query", |b| {
        b.iter(|| citytz_core::validate::validate_query(black_box("  San Francisco  "), 100))
    });
}

criterion_group!(benches, bench_lookup_exact, bench_scans, bench_validation);
criterion_main!(benches);
