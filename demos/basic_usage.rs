//! Basic usage example for citytz-rs
//!
//! Loads the bundled dataset and runs each kind of query once.

use citytz_core::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== citytz-rs Basic Usage Example ===\n");

    let dataset = Arc::new(Dataset::new(DatasetFile::bundled()));
    let engine = SearchEngine::new(dataset);

    let stats = engine.stats()?;
    println!(
        "Loaded {} cities in {} countries across {} timezones\n",
        stats.records, stats.countries, stats.timezones
    );

    // Exact lookup: case-insensitive, results are cached.
    println!("--- Exact lookup: \"chicago\" ---");
    for city in engine.lookup_exact("chicago")? {
        println!("  {} ({}) -> {}", city.name(), city.province(), city.timezone());
    }
    println!();

    // Partial search: every word must match.
    println!("--- Partial search: \"springfield mo\" ---");
    for city in engine.find_partial("springfield mo")? {
        let (lat, lng) = city.coordinates();
        println!("  {}, {} at ({lat:.4}, {lng:.4})", city.name(), city.state_ansi);
    }
    println!();

    // Country code: ISO2 or ISO3.
    println!("--- Country code: \"DEU\" ---");
    for city in engine.find_by_country_code("DEU")? {
        println!("  {:<12} pop {:>12.0}", city.name(), city.population());
    }
    println!();

    // Configurable matcher.
    println!("--- Match \"zurich\" exactly on any field ---");
    let options = SearchOptions::new().exact_match(true);
    for city in engine.search("zurich", options)? {
        println!("  {} (ascii: {}) -> {}", city.name(), city.city_ascii, city.timezone());
    }
    println!();

    println!("Cached exact lookups: {}", engine.cache_len());
    Ok(())
}
