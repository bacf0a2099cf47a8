//! Diff engine benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gsn_bench::{generate_customers, revise_customers};
use gsn_core::{diff, Store};

/// Benchmark diffing a store against a revised snapshot.
fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");

    for size in [100, 1_000, 10_000] {
        let old = generate_customers(size);
        let new = revise_customers(&old, 0.2);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("revised", size),
            &(old.clone(), new),
            |b, (old, new)| {
                b.iter(|| black_box(diff(black_box(old), black_box(new))));
            },
        );

        group.bench_with_input(BenchmarkId::new("unchanged", size), &old, |b, old| {
            b.iter(|| black_box(diff(black_box(old), black_box(old))));
        });
    }

    group.finish();
}

/// Benchmark the store swap that follows a diff.
fn bench_replace_all(c: &mut Criterion) {
    let old = generate_customers(1_000);
    let new = revise_customers(&old, 0.2);
    c.bench_function("replace_all_1000", |b| {
        b.iter_batched(
            || (Store::new(old.clone()).unwrap(), new.clone()),
            |(mut store, snapshot)| {
                store.replace_all(snapshot).unwrap();
                black_box(store.len())
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_diff, bench_replace_all);
criterion_main!(benches);
