use crate::args::OutputFormat;
use citytz_core::{DbStats, Record};
use std::io::{self, Write};

const RULE_WIDTH: usize = 112;

pub fn records(out: &mut impl Write, records: &[Record], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => json(out, &records),
        OutputFormat::Table => table(out, records),
    }
}

pub fn stats(out: &mut impl Write, stats: &DbStats, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => json(out, stats),
        OutputFormat::Table => {
            writeln!(out, "Dataset statistics:")?;
            writeln!(out, "  Cities:    {}", stats.records)?;
            writeln!(out, "  Countries: {}", stats.countries)?;
            writeln!(out, "  Timezones: {}", stats.timezones)
        }
    }
}

pub fn json(out: &mut impl Write, value: &impl serde::Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn table(out: &mut impl Write, records: &[Record]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No cities found.");
    }

    writeln!(out, "Found {} cities:\n", records.len())?;
    writeln!(
        out,
        "{:<20} {:<15} {:<20} {:<20} {:<10} {:>10} {:>10}",
        "City", "Province", "Country", "Timezone", "ISO2/ISO3", "Lat", "Lng"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for r in records {
        writeln!(
            out,
            "{:<20} {:<15} {:<20} {:<20} {:<10} {:>10.4} {:>10.4}",
            truncate(&r.city, 20),
            truncate(&r.province, 15),
            truncate(&r.country, 20),
            truncate(&r.timezone, 20),
            format!("{}/{}", r.iso2, r.iso3),
            r.lat,
            r.lng
        )?;
    }
    Ok(())
}

/// Shortens `s` to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut short: String = s.chars().take(keep).collect();
    short.push_str("...");
    short
}
