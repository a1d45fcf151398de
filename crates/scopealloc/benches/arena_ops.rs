//! Criterion benchmarks for the allocation hot paths.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use scopealloc::{
    FixedArena, GrowingArena, PerThreadArena, RegionScope, SharedFixedArena, SliceAllocator,
};

const ROUNDS: usize = 256;

fn bench_growing(c: &mut Criterion) {
    let mut group = c.benchmark_group("GrowingArena");
    for &size in &[16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || GrowingArena::new(RegionScope::confined()).unwrap(),
                |arena| {
                    for _ in 0..ROUNDS {
                        let _ = arena.allocate(size, 8).unwrap();
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_fixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("FixedArena");
    group.bench_function("allocate_64b", |b| {
        b.iter_batched(
            || FixedArena::new(RegionScope::confined(), ROUNDS * 64).unwrap(),
            |arena| {
                for _ in 0..ROUNDS {
                    let _ = arena.allocate(64, 8).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("SharedFixedArena");
    group.bench_function("allocate_64b_uncontended", |b| {
        b.iter_batched(
            || SharedFixedArena::new(RegionScope::shared(), ROUNDS * 64).unwrap(),
            |arena| {
                for _ in 0..ROUNDS {
                    let _ = arena.allocate(64, 8).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_per_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("PerThreadArena");
    group.bench_function("allocate_64b_single_thread", |b| {
        b.iter_batched(
            || PerThreadArena::new(RegionScope::shared()),
            |arena| {
                for _ in 0..ROUNDS {
                    let _ = arena.allocate(64, 8).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_growing, bench_fixed, bench_shared, bench_per_thread);
criterion_main!(benches);
