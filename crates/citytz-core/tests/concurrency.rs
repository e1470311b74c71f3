use citytz_core::limits::{Gatekeeper, LimitsConfig};
use citytz_core::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn record(city: &str, tz: &str) -> Record {
    Record {
        city: city.into(),
        city_ascii: city.into(),
        timezone: tz.into(),
        ..Default::default()
    }
}

#[test]
fn dataset_loads_once_across_threads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let source = move || -> std::result::Result<Vec<Record>, DataLoadError> {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Ok(vec![record("Lima", "America/Lima")])
    };
    let dataset = Arc::new(Dataset::new(source));

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| assert_eq!(dataset.load().unwrap().len(), 1));
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn shared_engine_serves_parallel_queries() {
    let records = (0..200)
        .map(|i| record(&format!("Town {i}"), "Europe/Vienna"))
        .collect();
    let engine = SearchEngine::new(Arc::new(Dataset::from_records(records)));

    thread::scope(|s| {
        for t in 0..8 {
            let engine = &engine;
            s.spawn(move || {
                for i in 0..50 {
                    let name = format!("town {}", (t * 13 + i) % 200);
                    let hits = engine.lookup_exact(&name).unwrap();
                    assert_eq!(hits.len(), 1);
                }
            });
        }
    });

    assert!(engine.cache_len() <= 200);
    assert!(engine.cache_len() > 0);
}

#[test]
fn gatekeeper_bounds_a_shared_engine() {
    let engine = SearchEngine::new(Arc::new(Dataset::from_records(vec![record(
        "Oslo",
        "Europe/Oslo",
    )])));
    let gate = Gatekeeper::new(LimitsConfig::default().rate_limit(5));
    let admitted = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..5 {
                    if let Ok(hits) = gate.run("shared-caller", 1, || engine.lookup_exact("oslo")) {
                        assert_eq!(hits.unwrap().len(), 1);
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(admitted.load(Ordering::SeqCst), 5);
    assert_eq!(gate.resources().usage().active_searches, 0);
}
