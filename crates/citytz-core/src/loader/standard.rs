// crates/citytz-core/src/loader/standard.rs
use crate::error::DataLoadError;
use crate::model::Record;
use bincode::Options;

/// Upper bound for a decoded snapshot. Guards against corrupt length prefixes.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

/// Encoding options shared by the snapshot writer and reader.
pub(crate) fn snapshot_options() -> impl Options {
    bincode::DefaultOptions::new()
}

/// Decodes a bincode snapshot produced by the builder.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<Record>, DataLoadError> {
    snapshot_options()
        .with_limit(SNAPSHOT_LIMIT)
        .allow_trailing_bytes()
        .deserialize(bytes)
        .map_err(|e| DataLoadError::new("decode", e))
}
