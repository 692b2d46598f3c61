//! Benchmarks for level lookup and trail sampling.
//!
//! Run with: cargo bench --bench progression_bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sudoku_progression::data::ProgressionTables;
use sudoku_progression::level_info::{LevelInfoCache, compute_level_info};
use sudoku_progression::locale::Locale;
use sudoku_progression::trail::{TrailConfig, TrailGeometry};

fn bench_level_info(c: &mut Criterion) {
    let Ok(tables) = ProgressionTables::builtin(Locale::En) else {
        panic!("builtin tables failed to validate");
    };
    let mut group = c.benchmark_group("level_info");

    for xp in [0_i64, 600, 20_000, 500_000] {
        group.bench_with_input(BenchmarkId::new("compute", xp), &xp, |b, &xp| {
            b.iter(|| compute_level_info(&tables, black_box(xp)));
        });
    }

    let mut cache = LevelInfoCache::default();
    group.bench_function("cached", |b| {
        b.iter(|| cache.get_or_compute(&tables, black_box(600)).map(|i| i.progress_percentage));
    });

    group.bench_function("builtin_tables", |b| {
        b.iter(|| ProgressionTables::builtin(black_box(Locale::De)));
    });

    group.finish();
}

fn bench_trail(c: &mut Criterion) {
    let mut group = c.benchmark_group("trail");
    let config = TrailConfig::default();

    for nodes in [5, 20] {
        let trail = TrailGeometry::new(360.0, nodes, &config);
        let units = (nodes - 1) as f32 * 0.63;
        group.bench_with_input(BenchmarkId::new("truncated", nodes), &units, |b, &units| {
            b.iter(|| trail.truncated(black_box(units)).len());
        });
        group.bench_with_input(BenchmarkId::new("marker", nodes), &units, |b, &units| {
            b.iter(|| trail.marker(black_box(units)));
        });
    }

    group.bench_function("layout", |b| {
        b.iter(|| TrailGeometry::new(black_box(360.0), 5, &config));
    });

    group.finish();
}

criterion_group!(benches, bench_level_info, bench_trail);
criterion_main!(benches);
