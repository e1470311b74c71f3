//! Advanced example for citytz-rs
//!
//! Narrows results with filters, swaps in a custom data source and puts a
//! gatekeeper in front of a shared engine.

use citytz_core::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== citytz-rs Advanced Filtering Example ===\n");

    let engine = SearchEngine::new(Arc::new(Dataset::new(DatasetFile::bundled())));

    // Example 1: filters compose over any result set.
    println!("--- Example 1: European cities on Berlin time ---");
    let everything = engine.all_records()?.to_vec();
    let berlin_time = filter_by_timezone(everything, "Europe/Berlin");
    for city in limit(berlin_time, 5) {
        println!("  {} ({})", city.name(), city.country());
    }
    println!();

    println!("--- Example 2: US cities in the Chicago zone ---");
    let us = engine.find_by_country_code("US")?;
    let central = filter_by_timezone(us, "chicago");
    for city in &central {
        println!("  {}, {}", city.name(), city.state_ansi);
    }
    println!();

    // Example 3: a closure is a data source.
    println!("--- Example 3: Custom source ---");
    let source = || -> std::result::Result<Vec<Record>, DataLoadError> {
        Ok(vec![Record {
            city: "Ushuaia".into(),
            country: "Argentina".into(),
            iso2: "AR".into(),
            iso3: "ARG".into(),
            timezone: "America/Argentina/Ushuaia".into(),
            ..Default::default()
        }])
    };
    let custom = SearchEngine::new(Arc::new(Dataset::new(source)));
    for city in custom.find_partial("ushuaia argentina")? {
        println!("  {} -> {}", city.name(), city.timezone());
    }
    println!();

    // Example 4: admission control around a shared engine.
    println!("--- Example 4: Rate-limited workers ---");
    let gate = Gatekeeper::new(
        LimitsConfig::default()
            .rate_limit(6)
            .window(Duration::from_secs(60))
            .max_concurrent_searches(2),
    );
    thread::scope(|s| {
        for worker in 0..3 {
            let (engine, gate) = (&engine, &gate);
            s.spawn(move || {
                for query in ["Tokyo", "Paris", "Sydney"] {
                    match gate.run("demo", 1, || engine.lookup_exact(query)) {
                        Ok(Ok(found)) => println!("  worker {worker}: {query} -> {}", found.len()),
                        Ok(Err(e)) => println!("  worker {worker}: {e}"),
                        Err(rejected) => println!("  worker {worker}: {rejected}"),
                    }
                }
            });
        }
    });
    println!("  limiter tracks {} caller(s)", gate.limiter().tracked_keys());

    Ok(())
}
