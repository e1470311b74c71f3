// crates/citytz-core/src/loader/common_io.rs
use crate::error::{DataLoadError, LoadFailure};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reads a dataset file into memory, transparently gunzipping it.
///
/// Compression is detected from the gzip magic bytes rather than the file
/// extension, so `cityMap.json` and `cityMap.json.gz` both work.
pub fn read_payload(path: &Path) -> Result<Vec<u8>, DataLoadError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            DataLoadError::new(
                "open",
                LoadFailure::NotFound {
                    path: path.to_path_buf(),
                    source: e,
                },
            )
        } else {
            DataLoadError::new("open", e)
        }
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DataLoadError::new("read", e))?;

    if bytes.starts_with(&GZIP_MAGIC) {
        return gunzip(&bytes);
    }
    Ok(bytes)
}

#[cfg(feature = "compact")]
fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, DataLoadError> {
    use flate2::read::GzDecoder;

    let mut out = Vec::with_capacity(bytes.len() * 4);
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| DataLoadError::new("decompress", e))?;
    Ok(out)
}

#[cfg(not(feature = "compact"))]
fn gunzip(_bytes: &[u8]) -> Result<Vec<u8>, DataLoadError> {
    Err(DataLoadError::new(
        "decompress",
        LoadFailure::Unsupported("gzip input requires the `compact` feature".into()),
    ))
}
