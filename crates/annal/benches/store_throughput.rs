//! Benchmarks for append throughput and query latency
//!
//! Run with: cargo bench --bench store_throughput

use annal::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::thread;

fn bench_concurrent_appends(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_appends");
    let events_per_thread = 100;

    for num_threads in [1, 2, 4, 8].iter() {
        group.throughput(Throughput::Elements((num_threads * events_per_thread) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter_batched(
                    || Arc::new(AnnalDb::new()),
                    |db| {
                        let handles: Vec<_> = (0..num_threads)
                            .map(|t| {
                                let db = Arc::clone(&db);
                                thread::spawn(move || {
                                    for i in 0..events_per_thread {
                                        db.store()
                                            .create(
                                                "bench_event",
                                                &format!("thread {} event {}", t, i),
                                                None,
                                            )
                                            .unwrap();
                                    }
                                })
                            })
                            .collect();
                        for handle in handles {
                            handle.join().unwrap();
                        }
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_query_by_type(c: &mut Criterion) {
    let db = AnnalDb::new();
    for i in 0..10_000 {
        let event_type = if i % 100 == 0 { "rare_event" } else { "common_event" };
        db.store()
            .create(event_type, &format!("event {}", i), None)
            .unwrap();
    }

    let mut group = c.benchmark_group("query_by_type");
    group.bench_function("rare_over_10k", |b| {
        b.iter(|| {
            let events = db.store().query(black_box(Some("rare_event"))).unwrap();
            assert_eq!(events.len(), 100);
        })
    });
    group.bench_function("count_over_10k", |b| {
        b.iter(|| db.store().count(black_box(Some("common_event"))).unwrap())
    });
    group.finish();
}

fn bench_audited_login(c: &mut Criterion) {
    let db = AnnalDb::new();

    c.bench_function("audited_login", |b| {
        b.iter(|| {
            db.auth()
                .login(black_box("admin"), black_box("admin123"))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_concurrent_appends,
    bench_query_by_type,
    bench_audited_login
);
criterion_main!(benches);
