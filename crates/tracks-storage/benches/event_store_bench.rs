//! Criterion benchmarks for tracks-storage.
//!
//! Append latency is dominated by the FULL-sync commit, so file-backed and
//! in-memory numbers are reported separately.

use std::sync::Arc;

use chrono::Utc;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use tracks_core::{Event, EventFactory, IEventStorage, StaticContext, UserType};
use tracks_storage::EventStore;

fn bench_factory() -> EventFactory {
    EventFactory::new(Arc::new(
        StaticContext::empty()
            .with_attribute("device_info_os", "linux")
            .with_attribute("device_info_app_version", "1.0"),
    ))
}

fn make_bench_event(factory: &EventFactory, i: usize) -> Event {
    factory
        .create_event(
            &format!("bench_event_{i}"),
            Some("bench"),
            Some("1"),
            "Bench/1.0",
            UserType::Authenticated,
            Utc::now(),
        )
        .unwrap_or_else(|e| panic!("bench event: {e}"))
}

fn bench_create_event(c: &mut Criterion) {
    let factory = bench_factory();
    let mut i = 0;
    c.bench_function("factory_create_event", |b| {
        b.iter(|| {
            i += 1;
            make_bench_event(&factory, i)
        })
    });
}

fn bench_append_in_memory(c: &mut Criterion) {
    let factory = bench_factory();
    let store = EventStore::open_in_memory().unwrap();
    let mut i = 0;
    c.bench_function("append_in_memory", |b| {
        b.iter_batched(
            || {
                i += 1;
                make_bench_event(&factory, i)
            },
            |event| store.append(&event).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_append_file(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = EventStore::open(&dir.path().join("bench.db")).unwrap();
    let factory = bench_factory();
    let mut i = 0;
    c.bench_function("append_file_backed", |b| {
        b.iter_batched(
            || {
                i += 1;
                make_bench_event(&factory, i)
            },
            |event| store.append(&event).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_snapshot_1k(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = EventStore::open(&dir.path().join("snapshot.db")).unwrap();
    let factory = bench_factory();
    for i in 0..1_000 {
        store.append(&make_bench_event(&factory, i)).unwrap();
    }
    c.bench_function("all_events_1k", |b| b.iter(|| store.all_events().unwrap()));
    c.bench_function("pending_batch_100_of_1k", |b| {
        b.iter(|| store.pending_batch(100).unwrap())
    });
}

fn bench_drain_cycle(c: &mut Criterion) {
    let factory = bench_factory();
    c.bench_function("drain_batch_100", |b| {
        b.iter_batched(
            || {
                let store = EventStore::open_in_memory().unwrap();
                for i in 0..100 {
                    store.append(&make_bench_event(&factory, i)).unwrap();
                }
                store
            },
            |store| store.drain_batch(100, |_| Ok::<(), ()>(())).unwrap(),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_create_event,
    bench_append_in_memory,
    bench_append_file,
    bench_snapshot_1k,
    bench_drain_cycle,
);
criterion_main!(benches);
