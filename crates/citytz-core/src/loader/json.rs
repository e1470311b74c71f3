// crates/citytz-core/src/loader/json.rs

// ---------------------------------------------------------------------------
// FILE GUARD: This entire file is skipped if 'json' feature is missing.
// ---------------------------------------------------------------------------
#![cfg(feature = "json")]

use crate::error::DataLoadError;
use crate::model::Record;
use crate::raw;

/// Parses the source `cityMap.json` document into typed records.
pub fn parse_document(bytes: &[u8]) -> Result<Vec<Record>, DataLoadError> {
    raw::parse_records(bytes).map_err(|e| DataLoadError::new("parse", e))
}
