//! Benchmarks comparing strata Deque against std VecDeque.
//!
//! Run with: cargo bench --bench deque

use std::collections::VecDeque;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strata_collections::Deque;

const N: usize = 100_000;

// ============================================================================
// Push
// ============================================================================

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    group.throughput(Throughput::Elements(N as u64));

    group.bench_function("strata", |b| {
        b.iter(|| {
            let mut d = Deque::new();
            for i in 0..N as u64 {
                d.push_back(black_box(i));
            }
            d
        });
    });

    group.bench_function("VecDeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..N as u64 {
                d.push_back(black_box(i));
            }
            d
        });
    });

    group.finish();
}

fn bench_push_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_front");
    group.throughput(Throughput::Elements(N as u64));

    group.bench_function("strata", |b| {
        b.iter(|| {
            let mut d = Deque::new();
            for i in 0..N as u64 {
                d.push_front(black_box(i));
            }
            d
        });
    });

    group.bench_function("VecDeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..N as u64 {
                d.push_front(black_box(i));
            }
            d
        });
    });

    group.finish();
}

// ============================================================================
// Access
// ============================================================================

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_sequential");
    group.throughput(Throughput::Elements(N as u64));

    let ours: Deque<u64> = (0..N as u64).collect();
    let theirs: VecDeque<u64> = (0..N as u64).collect();

    group.bench_function("strata", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..N {
                sum = sum.wrapping_add(ours[i]);
            }
            black_box(sum)
        });
    });

    group.bench_function("VecDeque", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..N {
                sum = sum.wrapping_add(theirs[i]);
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    group.throughput(Throughput::Elements(N as u64));

    let ours: Deque<u64> = (0..N as u64).collect();
    let theirs: VecDeque<u64> = (0..N as u64).collect();

    group.bench_function("strata/iter", |b| {
        b.iter(|| black_box(ours.iter().fold(0u64, |a, &v| a.wrapping_add(v))));
    });

    group.bench_function("strata/segments", |b| {
        b.iter(|| {
            black_box(
                ours.segments()
                    .flat_map(|s| s.iter())
                    .fold(0u64, |a, &v| a.wrapping_add(v)),
            )
        });
    });

    group.bench_function("VecDeque", |b| {
        b.iter(|| black_box(theirs.iter().fold(0u64, |a, &v| a.wrapping_add(v))));
    });

    group.finish();
}

// ============================================================================
// Middle insertion
// ============================================================================

fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_middle");

    for len in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("strata", len), &len, |b, &len| {
            let mut d: Deque<u64> = (0..len as u64).collect();
            b.iter(|| {
                d.insert(len / 3, 0);
                black_box(d.remove(len / 3));
            });
        });

        group.bench_with_input(BenchmarkId::new("VecDeque", len), &len, |b, &len| {
            let mut d: VecDeque<u64> = (0..len as u64).collect();
            b.iter(|| {
                d.insert(len / 3, 0);
                black_box(d.remove(len / 3));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_front,
    bench_index,
    bench_iter,
    bench_insert_middle
);
criterion_main!(benches);
