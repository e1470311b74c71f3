// crates/citytz-core/src/loader/builder.rs
#![cfg(feature = "builder")]

use super::standard::snapshot_options;
use super::{DataSource, DatasetFile};
use crate::error::Result;
use crate::model::Record;
use bincode::Options;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    fn suffix(self) -> &'static str {
        match self {
            Self::Gzip => ".bin.gz",
            Self::None => ".bin",
        }
    }
}

/// `data/cityMap.json` -> `data/cityMap.bin` (or `.bin.gz`).
pub fn snapshot_path_for(source: &Path, compression: CompressionMode) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cityMap".to_string());
    let stem = name
        .trim_end_matches(".gz")
        .trim_end_matches(".json")
        .trim_end_matches(".bin");
    source.with_file_name(format!("{stem}{}", compression.suffix()))
}

// -----------------------------------------------------------------------------
// BUILDER
// -----------------------------------------------------------------------------

/// Loads `source` and compiles it into a snapshot at `out`.
///
/// Returns the number of records written.
pub fn build_snapshot(source: &Path, out: &Path, compression: CompressionMode) -> Result<usize> {
    info!(source = %source.display(), out = %out.display(), ?compression, "building snapshot");

    let records = DatasetFile::new(source).load()?;
    write_snapshot(out, &records, compression)?;

    info!(records = records.len(), "snapshot written");
    Ok(records.len())
}

/// Writes `records` to `path` in the snapshot encoding.
pub fn write_snapshot(path: &Path, records: &[Record], compression: CompressionMode) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                snapshot_options().serialize_into(&mut encoder, records)?;
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "gzip requested but 'compact' disabled",
                )
                .into());
            }
        }
        CompressionMode::None => {
            snapshot_options().serialize_into(&mut writer, records)?;
            writer.flush()?;
        }
    }
    Ok(())
}
