// crates/citytz-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to
//! specific parsers (Binary snapshot vs JSON).
//!
//! The loader is the only place that knows where records come from. The
//! rest of the crate sees a [`DataSource`] and the records it yields.

use crate::error::DataLoadError;
use crate::model::Record;
use std::path::{Path, PathBuf};

mod common_io;
mod standard;

#[cfg(feature = "json")]
mod json;

#[cfg(feature = "builder")]
pub mod builder;

pub use common_io::read_payload;
pub use standard::decode_snapshot;

/// File name of the bundled dataset inside [`default_data_dir`].
pub const DEFAULT_DATASET_FILENAME: &str = "cityMap.json";

/// `data/` directory shipped next to this crate's manifest.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn default_dataset_path() -> PathBuf {
    default_data_dir().join(DEFAULT_DATASET_FILENAME)
}

/// Produces the full record sequence. Called at most once per
/// [`crate::dataset::Dataset`].
pub trait DataSource: Send + Sync {
    fn load(&self) -> Result<Vec<Record>, DataLoadError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Any `Fn() -> Result<Vec<Record>, _>` closure is a source.
impl<F> DataSource for F
where
    F: Fn() -> Result<Vec<Record>, DataLoadError> + Send + Sync,
{
    fn load(&self) -> Result<Vec<Record>, DataLoadError> {
        self()
    }

    fn describe(&self) -> String {
        "custom source".to_string()
    }
}

/// How the bytes of a dataset file are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Snapshot,
}

impl DatasetFormat {
    /// `*.bin` and `*.bin.gz` are snapshots; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if name.ends_with(".bin") || name.ends_with(".bin.gz") {
            Self::Snapshot
        } else {
            Self::Json
        }
    }
}

/// A dataset file on disk: JSON or snapshot, optionally gzip-compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    path: PathBuf,
}

impl DatasetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The `cityMap.json` bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(default_dataset_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DatasetFormat {
        DatasetFormat::from_path(&self.path)
    }
}

impl DataSource for DatasetFile {
    fn load(&self) -> Result<Vec<Record>, DataLoadError> {
        let bytes = read_payload(&self.path)?;
        match self.format() {
            DatasetFormat::Snapshot => decode_snapshot(&bytes),
            #[cfg(feature = "json")]
            DatasetFormat::Json => json::parse_document(&bytes),
            #[cfg(not(feature = "json"))]
            DatasetFormat::Json => Err(DataLoadError::new(
                "parse",
                crate::error::LoadFailure::Unsupported("JSON input requires the `json` feature".into()),
            )),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A JSON document already held in memory.
#[cfg(feature = "json")]
#[derive(Clone, PartialEq, Eq)]
pub struct JsonBytes(pub Vec<u8>);

#[cfg(feature = "json")]
impl DataSource for JsonBytes {
    fn load(&self) -> Result<Vec<Record>, DataLoadError> {
        json::parse_document(&self.0)
    }

    fn describe(&self) -> String {
        format!("in-memory JSON ({} bytes)", self.0.len())
    }
}

#[cfg(feature = "json")]
impl std::fmt::Debug for JsonBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("JsonBytes").field(&self.0.len()).finish()
    }
}

/// Records that are already typed. Useful for embedding and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemory(pub Vec<Record>);

impl DataSource for InMemory {
    fn load(&self) -> Result<Vec<Record>, DataLoadError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory records ({})", self.0.len())
    }
}
