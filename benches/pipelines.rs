//! Lazy views against eager copies over the same pipeline.

use collection_pipes::ops::{filter, mutate, sorted, sub_range, sum, to_vec};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_test_data(size: usize) -> Vec<u64> {
    (0..size as u64).map(|i| (i * 7919) % 1000).collect()
}

fn bench_filter(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000, 100_000];

    let mut group = c.benchmark_group("filter_sum");

    for size in sizes {
        let data = generate_test_data(size);

        // View over the borrow: no intermediate container.
        group.bench_with_input(BenchmarkId::new("view", size), &size, |b, _| {
            b.iter(|| black_box(&data | filter(|x: &u64| x % 3 == 0) | sum()))
        });

        // Materialize, then sum.
        group.bench_with_input(BenchmarkId::new("materialized", size), &size, |b, _| {
            b.iter(|| black_box(&data | filter(|x: &u64| x % 3 == 0) | to_vec() | sum()))
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000, 100_000];

    let mut group = c.benchmark_group("sort_window");

    for size in sizes {
        let data = generate_test_data(size);

        group.bench_with_input(BenchmarkId::new("copy", size), &size, |b, _| {
            b.iter(|| black_box(&data | sorted()))
        });

        group.bench_with_input(BenchmarkId::new("in_place_window", size), &size, |b, _| {
            b.iter_batched_ref(
                || data.clone(),
                |v| {
                    let _ = v | mutate() | sub_range(size / 2) | sorted();
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort);
criterion_main!(benches);
