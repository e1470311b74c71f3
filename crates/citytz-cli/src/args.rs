use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for citytz
#[derive(Debug, Parser)]
#[command(
    name = "citytz",
    version,
    about = "Look up cities and their timezones from a local dataset"
)]
pub struct CliArgs {
    /// Dataset file: JSON, snapshot (.bin), either optionally gzipped
    /// (default: the bundled cityMap.json)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Keep only results whose timezone contains this fragment
    #[arg(short = 't', long = "timezone", global = true)]
    pub timezone: Option<String>,

    /// Keep only results whose country name contains this fragment
    #[arg(short = 'c', long = "country", global = true)]
    pub country: Option<String>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    /// Maximum number of results to print (0 = unlimited)
    #[arg(short = 'l', long = "limit", default_value_t = 10, global = true)]
    pub limit: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Exact, case-insensitive lookup by city name
    City {
        /// City name (e.g. "Chicago")
        name: String,
    },

    /// Match every word against city, state, province and country
    Search {
        /// Free text (e.g. "springfield illinois")
        text: String,
    },

    /// Find cities by ISO2 or ISO3 country code
    Iso {
        /// Country code (e.g. DE, USA)
        code: String,
    },

    /// Match any field with configurable case and exactness
    Match {
        query: String,

        /// Do not fold case before comparing
        #[arg(long)]
        case_sensitive: bool,

        /// Require whole-field equality instead of substring containment
        #[arg(long)]
        exact: bool,
    },

    /// Print every record
    All,

    /// Show a summary of the dataset contents
    Stats,

    /// Compile the input dataset into a binary snapshot
    Build {
        /// Output path (e.g. data/cityMap.bin)
        out: PathBuf,

        /// Gzip the snapshot
        #[arg(long)]
        gzip: bool,
    },

    /// Resolve city names read from stdin, one per line, under admission control
    Batch {
        /// Worker threads
        #[arg(long, default_value_t = 4)]
        threads: usize,

        /// Lookups allowed per window
        #[arg(long, default_value_t = 100)]
        rate_limit: usize,

        /// Rate-limit window in seconds
        #[arg(long, default_value_t = 60)]
        window_secs: u64,

        /// Memory budget in MB
        #[arg(long, default_value_t = 500)]
        max_memory_mb: u64,

        /// Concurrent lookups allowed
        #[arg(long, default_value_t = 50)]
        max_searches: usize,
    },
}
