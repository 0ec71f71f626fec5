//! Benchmarks for LruCore and ConcurrentLruCache.
//!
//! Run with: `cargo bench --bench lru`

use std::sync::Arc;
use std::thread;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use lrukit::policy::lru::{ConcurrentLruCache, LruCore};
use lrukit::traits::{CoreCache, LruCacheTrait};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn warm_core(capacity: u64) -> LruCore<u64, u64> {
    let mut cache = LruCore::new(capacity as usize);
    for i in 0..capacity {
        cache.insert(i, i);
    }
    cache
}

// ============================================================================
// Single-threaded core
// ============================================================================

fn bench_core_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_core");
    group.throughput(Throughput::Elements(2048));

    group.bench_function("insert_get", |b| {
        b.iter_batched(
            || warm_core(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_core_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_core");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("eviction_churn", |b| {
        b.iter_batched(
            || warm_core(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_core_pop_and_touch(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_core");
    group.throughput(Throughput::Elements(1024));

    group.bench_function("pop_lru", |b| {
        b.iter_batched(
            || warm_core(1024),
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = std::hint::black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("touch_hotset", |b| {
        b.iter_batched(
            || warm_core(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    let _ = std::hint::black_box(cache.touch(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Thread-safe wrapper
// ============================================================================

fn bench_concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_concurrent");
    let threads = 4;
    let ops_per_thread = 2_000;
    group.throughput(Throughput::Elements((threads * ops_per_thread) as u64));

    group.bench_function("mixed_4_threads", |b| {
        b.iter_batched(
            || {
                let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(1024);
                for i in 0..1024u64 {
                    cache.insert(i, i);
                }
                cache
            },
            |cache| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let cache = cache.clone();
                        thread::spawn(move || {
                            let mut rng = StdRng::seed_from_u64(t as u64);
                            for _ in 0..ops_per_thread {
                                let key = rng.gen_range(0..2048u64);
                                if rng.gen_bool(0.75) {
                                    let _ = std::hint::black_box(cache.get(&key));
                                } else {
                                    cache.insert(key, key);
                                }
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("shared_arc_values", |b| {
        let cache: ConcurrentLruCache<u64, Vec<u8>> = ConcurrentLruCache::new(256);
        let payload = Arc::new(vec![0u8; 512]);
        b.iter(|| {
            for i in 0..256u64 {
                cache.insert_arc(i, Arc::clone(&payload));
                let _ = std::hint::black_box(cache.get(&i));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_core_insert_get,
    bench_core_eviction_churn,
    bench_core_pop_and_touch,
    bench_concurrent_mixed
);
criterion_main!(benches);
