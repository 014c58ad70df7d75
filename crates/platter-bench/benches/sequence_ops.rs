//! Criterion micro-benchmarks: pooled sequence against the unpooled
//! `LinkedList` and contiguous `Vec` baselines.

use std::collections::LinkedList;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use platter_bench::churn_mask;
use platter_pool::PooledSequence;

const N: u64 = 10_000;

fn filled_pool() -> PooledSequence<u64> {
    let mut seq = PooledSequence::new();
    seq.extend_back(0..N).unwrap();
    seq
}

/// Benchmark: push 10K values to the back.
fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back_10k");
    group.bench_function("pooled", |b| {
        b.iter(|| black_box(filled_pool()));
    });
    group.bench_function("linked_list", |b| {
        b.iter(|| black_box((0..N).collect::<LinkedList<_>>()));
    });
    group.bench_function("vec", |b| {
        b.iter(|| black_box((0..N).collect::<Vec<_>>()));
    });
    group.finish();
}

/// Benchmark: erase ~30% of 10K elements in one pass.
fn bench_erase_churn(c: &mut Criterion) {
    let mask = churn_mask(N as usize, 0.3, 17);
    let mut group = c.benchmark_group("erase_30pct_10k");
    group.bench_function("pooled_lazy", |b| {
        b.iter(|| {
            let mut seq = filled_pool();
            seq.erase_if(|v| mask[*v as usize]);
            black_box(seq.len())
        });
    });
    group.bench_function("pooled_compacted", |b| {
        b.iter(|| {
            let mut seq = filled_pool();
            seq.erase_if(|v| mask[*v as usize]);
            black_box(seq.compact())
        });
    });
    group.bench_function("linked_list", |b| {
        b.iter(|| {
            let list: LinkedList<u64> = (0..N).collect();
            let kept: LinkedList<u64> =
                list.into_iter().filter(|v| !mask[*v as usize]).collect();
            black_box(kept.len())
        });
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut vec: Vec<u64> = (0..N).collect();
            vec.retain(|v| !mask[*v as usize]);
            black_box(vec.len())
        });
    });
    group.finish();
}

/// Benchmark: sum 10K values after a churn pass, with and without compaction.
fn bench_iterate(c: &mut Criterion) {
    let mask = churn_mask(N as usize, 0.5, 23);
    let mut fragmented = filled_pool();
    fragmented.erase_if(|v| mask[*v as usize]);
    let mut packed = filled_pool();
    packed.erase_if(|v| mask[*v as usize]);
    packed.compact();

    let mut group = c.benchmark_group("iterate_after_churn");
    group.bench_function("pooled_fragmented", |b| {
        b.iter(|| black_box(fragmented.iter().sum::<u64>()));
    });
    group.bench_function("pooled_packed", |b| {
        b.iter(|| black_box(packed.iter().sum::<u64>()));
    });
    group.finish();
}

criterion_group!(benches, bench_push_back, bench_erase_churn, bench_iterate);
criterion_main!(benches);
