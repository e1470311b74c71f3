//! citytz: look up cities and their timezones from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Exact city lookup
//!   $ citytz city Chicago
//!
//! - Every word must match somewhere in city, state, province or country
//!   $ citytz search "springfield mo"
//!
//! - All cities of a country, at most five
//!   $ citytz --limit 5 iso DE
//!
//! - Anything in New York's zone, as JSON
//!   $ citytz --timezone America/New_York --output json all
//!
//! - Resolve a list of names under a rate limit
//!   $ cat names.txt | citytz batch --threads 8 --rate-limit 20
//!
//! By default the dataset bundled with `citytz-core` is loaded. Use
//! `--input <path>` for another JSON file or a snapshot built with
//! `citytz build`.
mod args;
mod render;

use crate::args::{CliArgs, Commands, OutputFormat};
use anyhow::Context;
use citytz_core::filter::{filter_by_country, filter_by_timezone, limit};
use citytz_core::limits::{Gatekeeper, LimitsConfig};
use citytz_core::loader::DatasetFile;
use citytz_core::{AdmissionError, Dataset, Record, SearchEngine, SearchError, SearchOptions};
use clap::Parser;
use rayon::prelude::*;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

/// Caller identity used for rate limiting stdin batches.
const BATCH_CALLER: &str = "stdin";
/// Memory reserved per batch lookup.
const BATCH_LOOKUP_MB: u64 = 1;

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose)?;

    let source = match &args.input {
        Some(path) => DatasetFile::new(path),
        None => DatasetFile::bundled(),
    };
    info!(path = %source.path().display(), "using dataset");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Commands::Build { out: target, gzip } => build(source.path(), target, *gzip)?,

        Commands::Stats => {
            let engine = SearchEngine::new(Arc::new(Dataset::new(source)));
            let stats = engine.stats()?;
            render::stats(&mut out, &stats, args.output)?;
        }

        Commands::Batch {
            threads,
            rate_limit,
            window_secs,
            max_memory_mb,
            max_searches,
        } => {
            let engine = SearchEngine::new(Arc::new(Dataset::new(source)));
            let gate = Gatekeeper::new(
                LimitsConfig::default()
                    .rate_limit(*rate_limit)
                    .window(Duration::from_secs(*window_secs))
                    .max_memory_mb(*max_memory_mb)
                    .max_concurrent_searches(*max_searches),
            );
            let queries = read_queries(io::stdin().lock())?;
            let outcomes = run_batch(&engine, &gate, &queries, *threads)?;
            print_batch(&mut out, &args, &queries, outcomes)?;
        }

        query => {
            let engine = SearchEngine::new(Arc::new(Dataset::new(source)));
            let found = run_query(&engine, query)?;
            render::records(&mut out, &narrow(found, &args), args.output)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn run_query(engine: &SearchEngine, command: &Commands) -> anyhow::Result<Vec<Record>> {
    let found = match command {
        Commands::City { name } => engine.lookup_exact(name)?,
        Commands::Search { text } => engine.find_partial(text)?,
        Commands::Iso { code } => engine.find_by_country_code(code)?,
        Commands::Match {
            query,
            case_sensitive,
            exact,
        } => engine.search(
            query,
            SearchOptions::new()
                .case_sensitive(*case_sensitive)
                .exact_match(*exact),
        )?,
        Commands::All => engine.all_records()?.to_vec(),
        Commands::Stats | Commands::Build { .. } | Commands::Batch { .. } => {
            anyhow::bail!("not a record query")
        }
    };
    Ok(found)
}

/// Applies the global `--timezone`, `--country` and `--limit` flags.
fn narrow(records: Vec<Record>, args: &CliArgs) -> Vec<Record> {
    let mut records = records;
    if let Some(tz) = &args.timezone {
        records = filter_by_timezone(records, tz);
    }
    if let Some(country) = &args.country {
        records = filter_by_country(records, country);
    }
    limit(records, args.limit)
}

#[cfg(feature = "builder")]
fn build(source: &std::path::Path, target: &std::path::Path, gzip: bool) -> anyhow::Result<()> {
    use citytz_core::loader::builder::{build_snapshot, CompressionMode};

    let compression = if gzip {
        CompressionMode::Gzip
    } else {
        CompressionMode::None
    };
    let count = build_snapshot(source, target, compression)
        .with_context(|| format!("building snapshot {}", target.display()))?;
    eprintln!("Wrote {count} cities to {}", target.display());
    Ok(())
}

#[cfg(not(feature = "builder"))]
fn build(_source: &std::path::Path, _target: &std::path::Path, _gzip: bool) -> anyhow::Result<()> {
    anyhow::bail!("this binary was built without the `builder` feature")
}

// -----------------------------------------------------------------------------
// BATCH
// -----------------------------------------------------------------------------

enum BatchOutcome {
    Found(Vec<Record>),
    Rejected(AdmissionError),
    Failed(SearchError),
}

fn read_queries(input: impl BufRead) -> anyhow::Result<Vec<String>> {
    let mut queries = Vec::new();
    for line in input.lines() {
        let line = line.context("reading city names from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            queries.push(line.to_string());
        }
    }
    Ok(queries)
}

/// Resolves `queries` on a pool of `threads` workers; outcomes keep input order.
fn run_batch(
    engine: &SearchEngine,
    gate: &Gatekeeper,
    queries: &[String],
    threads: usize,
) -> anyhow::Result<Vec<BatchOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .context("starting batch workers")?;

    Ok(pool.install(|| {
        queries
            .par_iter()
            .map(|query| {
                match gate.run(BATCH_CALLER, BATCH_LOOKUP_MB, || engine.lookup_exact(query)) {
                    Ok(Ok(found)) => BatchOutcome::Found(found),
                    Ok(Err(err)) => BatchOutcome::Failed(err),
                    Err(rejected) => {
                        warn!(%query, reason = %rejected, "lookup not admitted");
                        BatchOutcome::Rejected(rejected)
                    }
                }
            })
            .collect()
    }))
}

fn print_batch(
    out: &mut impl Write,
    args: &CliArgs,
    queries: &[String],
    outcomes: Vec<BatchOutcome>,
) -> anyhow::Result<()> {
    match args.output {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = queries
                .iter()
                .zip(outcomes)
                .map(|(query, outcome)| match outcome {
                    BatchOutcome::Found(found) => serde_json::json!({
                        "query": query,
                        "results": narrow(found, args),
                    }),
                    BatchOutcome::Rejected(err) => serde_json::json!({
                        "query": query,
                        "error": err.to_string(),
                    }),
                    BatchOutcome::Failed(err) => serde_json::json!({
                        "query": query,
                        "error": err.to_string(),
                    }),
                })
                .collect();
            render::json(&mut *out, &entries)?;
        }
        OutputFormat::Table => {
            for (query, outcome) in queries.iter().zip(outcomes) {
                writeln!(out, "== {query}")?;
                match outcome {
                    BatchOutcome::Found(found) => {
                        render::records(&mut *out, &narrow(found, args), OutputFormat::Table)?
                    }
                    BatchOutcome::Rejected(err) => writeln!(out, "skipped: {err}")?,
                    BatchOutcome::Failed(err) => writeln!(out, "error: {err}")?,
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SearchEngine {
        let records = ["Lima", "Quito", "Bogotá"]
            .into_iter()
            .map(|city| Record {
                city: city.into(),
                timezone: format!("America/{city}"),
                ..Default::default()
            })
            .collect();
        SearchEngine::new(Arc::new(Dataset::from_records(records)))
    }

    #[test]
    fn queries_skip_blank_lines() {
        let input = "Lima\n\n  Quito  \n";
        assert_eq!(read_queries(input.as_bytes()).unwrap(), ["Lima", "Quito"]);
    }

    #[test]
    fn batch_keeps_order_and_respects_the_rate_limit() {
        let engine = engine();
        let gate = Gatekeeper::new(LimitsConfig::default().rate_limit(2));
        let queries: Vec<String> = ["lima", "quito", "bogotá"].map(String::from).to_vec();

        let outcomes = run_batch(&engine, &gate, &queries, 1).unwrap();
        assert!(matches!(&outcomes[0], BatchOutcome::Found(r) if r[0].city == "Lima"));
        assert!(matches!(&outcomes[1], BatchOutcome::Found(r) if r[0].city == "Quito"));
        assert!(matches!(
            &outcomes[2],
            BatchOutcome::Rejected(AdmissionError::RateLimited { .. })
        ));
    }

    #[test]
    fn batch_reports_invalid_queries() {
        let engine = engine();
        let gate = Gatekeeper::default();
        let queries = vec!["<script>".to_string()];

        let outcomes = run_batch(&engine, &gate, &queries, 4).unwrap();
        assert!(matches!(&outcomes[0], BatchOutcome::Failed(e) if e.validation().is_some()));
    }

    #[test]
    fn parallel_batch_preserves_input_order() {
        let engine = engine();
        let gate = Gatekeeper::new(LimitsConfig::default().rate_limit(1_000));
        let queries: Vec<String> = ["Quito", "Lima", "Bogotá"]
            .iter()
            .cycle()
            .take(90)
            .map(|q| q.to_string())
            .collect();

        let outcomes = run_batch(&engine, &gate, &queries, 8).unwrap();
        assert_eq!(outcomes.len(), queries.len());
        for (query, outcome) in queries.iter().zip(&outcomes) {
            assert!(matches!(outcome, BatchOutcome::Found(r) if &r[0].city == query));
        }
        assert_eq!(gate.resources().usage().active_searches, 0);
    }

    #[test]
    fn global_flags_narrow_results() {
        let args = CliArgs::parse_from(["citytz", "--timezone", "america/l", "--limit", "0", "all"]);
        let found = run_query(&engine(), &args.command).unwrap();
        let narrowed = narrow(found, &args);
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].city, "Lima");
    }
}
