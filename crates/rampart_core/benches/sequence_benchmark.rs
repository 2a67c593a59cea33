//! # Guarded Sequence Benchmark
//!
//! Measures:
//! 1. Uncontended shared vs exclusive acquisition
//! 2. Snapshot copy cost by sequence size
//! 3. Selector removal against a separate find-then-remove
//! 4. Read throughput with writers contending

#![allow(missing_docs)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rampart_core::GuardedSequence;

/// Single-threaded cost of each lock mode
fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended");
    let seq: GuardedSequence<u64> = (0..1_024).collect();

    group.bench_function("len", |b| b.iter(|| black_box(seq.len())));
    group.bench_function("get", |b| b.iter(|| black_box(seq.get(black_box(512)))));
    group.bench_function("set", |b| b.iter(|| black_box(seq.set(black_box(512), 7))));
    group.bench_function("push_take", |b| {
        b.iter(|| {
            seq.push(black_box(1));
            black_box(seq.take_at(1_024))
        });
    });

    group.finish();
}

/// Snapshot = clone under a read guard
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for size in [16, 1_024, 65_536] {
        let seq: GuardedSequence<u64> = (0..size).collect();
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("iterate", size), &size, |b, _| {
            b.iter(|| seq.snapshot().fold(0u64, |acc, v| acc.wrapping_add(v)));
        });
    }

    group.finish();
}

/// One exclusive acquisition vs read-then-write
fn bench_selector_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_and_remove");
    let size = 4_096u64;

    group.bench_function("remove_selected", |b| {
        let seq: GuardedSequence<u64> = (0..size).collect();
        b.iter(|| {
            let picked = seq.remove_selected(|items| items.iter().copied().find(|v| v % 2 == 1));
            if let Some(v) = picked.removed() {
                seq.push(v);
            }
        });
    });

    group.bench_function("index_where_then_take_at", |b| {
        let seq: GuardedSequence<u64> = (0..size).collect();
        b.iter(|| {
            if let Some(index) = seq.index_where(|v| v % 2 == 1) {
                if let Ok(v) = seq.take_at(index) {
                    seq.push(v);
                }
            }
        });
    });

    group.finish();
}

/// Reads while background writers hold the exclusive lock intermittently
fn bench_contended_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");

    for writers in [0usize, 1, 4] {
        let seq: Arc<GuardedSequence<u64>> = Arc::new((0..1_024).collect());
        let running = Arc::new(AtomicBool::new(true));

        let handles: Vec<_> = (0..writers)
            .map(|_| {
                let seq = Arc::clone(&seq);
                let running = Arc::clone(&running);
                thread::spawn(move || {
                    while running.load(Ordering::Relaxed) {
                        seq.push(0);
                        let _ = seq.take_at(0);
                    }
                })
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("contains", writers), &writers, |b, _| {
            b.iter(|| black_box(seq.contains(black_box(&1_000))));
        });

        running.store(false, Ordering::Relaxed);
        for h in handles {
            let _ = h.join();
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_uncontended,
    bench_snapshot,
    bench_selector_removal,
    bench_contended_reads,
);
criterion_main!(benches);
