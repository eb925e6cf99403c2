//! Concurrent producers and a concurrent dispatcher against one file-backed
//! store. No event may be lost, duplicated, or reordered within a producer.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Barrier};
use std::thread;

use chrono::Utc;
use tracks_core::{DrainOutcome, Event, EventFactory, IEventStorage, StaticContext, UserType};
use tracks_storage::EventStore;

const PRODUCERS: usize = 8;
const EVENTS_PER_PRODUCER: usize = 50;

fn factory() -> EventFactory {
    EventFactory::new(Arc::new(StaticContext::empty()))
}

fn producer_event(factory: &EventFactory, producer: usize, seq: usize) -> Event {
    factory
        .create_event(
            &format!("p{producer}-{seq}"),
            None,
            None,
            "",
            UserType::Anonymous,
            Utc::now(),
        )
        .unwrap()
}

fn parse_name(name: &str) -> (usize, usize) {
    let (producer, seq) = name
        .trim_start_matches('p')
        .split_once('-')
        .unwrap();
    (producer.parse().unwrap(), seq.parse().unwrap())
}

#[test]
fn concurrent_appends_are_all_retained_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(EventStore::open(&dir.path().join("concurrent.db")).unwrap());
    let barrier = Arc::new(Barrier::new(PRODUCERS));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let f = factory();
                barrier.wait();
                for seq in 0..EVENTS_PER_PRODUCER {
                    store.append(&producer_event(&f, p, seq)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let all = store.all_events().unwrap();
    assert_eq!(all.len(), PRODUCERS * EVENTS_PER_PRODUCER);
    assert_eq!(store.count().unwrap(), all.len());

    let ids: HashSet<_> = all.iter().map(Event::id).collect();
    assert_eq!(ids.len(), all.len(), "no duplicates");

    // Each producer's events appear in the order it appended them.
    let mut last_seq: HashMap<usize, usize> = HashMap::new();
    for event in &all {
        let (producer, seq) = parse_name(event.name());
        if let Some(prev) = last_seq.insert(producer, seq) {
            assert!(seq > prev, "producer {producer} reordered: {prev} then {seq}");
        }
    }
}

#[test]
fn readers_see_consistent_snapshots_during_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(EventStore::open(&dir.path().join("snapshots.db")).unwrap());

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let f = factory();
            for seq in 0..200 {
                store.append(&producer_event(&f, 0, seq)).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut previous = 0;
                for _ in 0..50 {
                    let snapshot = store.all_events().unwrap();
                    // Appends only: a later snapshot is never shorter.
                    assert!(snapshot.len() >= previous);
                    for (i, event) in snapshot.iter().enumerate() {
                        assert_eq!(parse_name(event.name()).1, i, "snapshot has a gap");
                    }
                    previous = snapshot.len();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(store.count().unwrap(), 200);
}

#[test]
fn dispatch_while_producing_loses_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(EventStore::open(&dir.path().join("drain.db")).unwrap());
    let total = PRODUCERS * EVENTS_PER_PRODUCER;

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let f = factory();
                for seq in 0..EVENTS_PER_PRODUCER {
                    store.append(&producer_event(&f, p, seq)).unwrap();
                }
            })
        })
        .collect();

    let dispatcher = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let mut delivered = Vec::new();
            while delivered.len() < total {
                let outcome = store
                    .drain_batch(17, |batch| {
                        delivered.extend(batch.iter().map(Event::id));
                        Ok::<(), ()>(())
                    })
                    .unwrap();
                if matches!(outcome, DrainOutcome::Empty) {
                    thread::yield_now();
                }
            }
            delivered
        })
    };

    for p in producers {
        p.join().unwrap();
    }
    let delivered = dispatcher.join().unwrap();

    assert_eq!(delivered.len(), total);
    let unique: HashSet<_> = delivered.iter().collect();
    assert_eq!(unique.len(), total, "an event was delivered twice");
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn concurrent_removal_of_same_events_counts_once() {
    let store = Arc::new(EventStore::open_in_memory().unwrap());
    let f = factory();
    let events: Vec<Event> = (0..100).map(|i| producer_event(&f, 0, i)).collect();
    for event in &events {
        store.append(event).unwrap();
    }
    let events = Arc::new(events);
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let events = Arc::clone(&events);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.remove(&events).unwrap()
            })
        })
        .collect();

    let removed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(removed, 100);
    assert_eq!(store.count().unwrap(), 0);
}
