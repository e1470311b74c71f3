//! Error handling example for citytz-rs
//!
//! Shows how each failure is reported and which ones are recoverable.

use citytz_core::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== citytz-rs Error Handling Example ===\n");

    // Example 1: a dataset that cannot be loaded. The failure is cached, so
    // every query reports the same error without touching the disk again.
    println!("--- Example 1: Missing dataset ---");
    let missing = SearchEngine::new(Arc::new(Dataset::new(DatasetFile::new(
        "does/not/exist/cityMap.json",
    ))));
    for query in ["Berlin", "Tokyo"] {
        match missing.lookup_exact(query) {
            Ok(_) => println!("  unexpected success for {query}"),
            Err(e) => match e.data_load() {
                Some(load) => println!("  {query}: load failed during '{}'", load.operation),
                None => println!("  {query}: {e}"),
            },
        }
    }
    println!();

    let engine = SearchEngine::new(Arc::new(Dataset::new(DatasetFile::bundled())));

    // Example 2: no match is not an error.
    println!("--- Example 2: Unknown cities ---");
    for query in ["Atlantis", "El Dorado"] {
        let found = engine.lookup_exact(query)?;
        println!("  {query}: {} result(s)", found.len());
    }
    println!();

    // Example 3: rejected input carries the field and the reason.
    println!("--- Example 3: Invalid input ---");
    let long = "x".repeat(150);
    for query in ["../../etc/passwd", "<script>alert(1)</script>", long.as_str()] {
        if let Err(e) = engine.lookup_exact(query) {
            if let Some(v) = e.validation() {
                println!("  field '{}': {}", v.field, v.message());
            }
        }
    }
    println!();

    // Example 4: country codes.
    println!("--- Example 4: Country code validation ---");
    for code in ["us", "usa", "", "U1", "USAA"] {
        match engine.find_by_country_code(code) {
            Ok(found) => println!("  {code:?}: {} result(s)", found.len()),
            Err(e) => println!("  {code:?}: {}", e.validation().map_or(e.to_string(), |v| v.to_string())),
        }
    }

    Ok(())
}
