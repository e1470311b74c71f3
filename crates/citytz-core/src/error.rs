// crates/citytz-core/src/error.rs

//! Error taxonomy shared by every component of the query layer.
//!
//! All errors are `Clone` so a failed dataset load can be stored once and
//! handed back, unchanged, to every later caller.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Low-level reason why the dataset could not be produced.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("dataset not found at {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("{0}")]
    Unsupported(String),
}

/// The dataset could not be produced.
///
/// Fatal to every query issued before a successful load. The underlying
/// failure sits behind an `Arc` so the cached error is shared, not rebuilt.
#[derive(Debug, Clone, Error)]
#[error("failed to load city data during {operation}: {source}")]
pub struct DataLoadError {
    pub operation: &'static str,
    #[source]
    pub source: Arc<LoadFailure>,
}

impl DataLoadError {
    pub fn new(operation: &'static str, failure: impl Into<LoadFailure>) -> Self {
        Self {
            operation,
            source: Arc::new(failure.into()),
        }
    }

    pub fn failure(&self) -> &LoadFailure {
        &self.source
    }
}

/// What exactly was wrong with a validated input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    TooLong { len: usize, max: usize },
    InvalidEncoding,
    SuspiciousPattern { category: &'static str },
    InvalidIso2,
    InvalidIso3,
    InvalidCodeLength,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { len, max } => write!(f, "input too long: {len} bytes (max: {max})"),
            Self::InvalidEncoding => f.write_str("input contains invalid UTF-8"),
            Self::SuspiciousPattern { category } => {
                write!(f, "input contains a suspicious pattern ({category})")
            }
            Self::InvalidIso2 => f.write_str("invalid ISO2 country code format"),
            Self::InvalidIso3 => f.write_str("invalid ISO3 country code format"),
            Self::InvalidCodeLength => f.write_str("ISO code must be 2 or 3 characters"),
        }
    }
}

/// An input failed a precondition. Always recoverable: fix the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation error for field '{field}': {kind}{}", value_suffix(.value))]
pub struct ValidationError {
    pub field: &'static str,
    pub kind: ValidationKind,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: &'static str, kind: ValidationKind) -> Self {
        Self {
            field,
            kind,
            value: None,
        }
    }

    /// Attach the offending value; it is echoed in the message.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

fn value_suffix(value: &Option<String>) -> String {
    value
        .as_ref()
        .map(|v| format!(" (value: {v})"))
        .unwrap_or_default()
}

/// The lower-level failure wrapped by a [`SearchError`].
#[derive(Debug, Clone, Error)]
pub enum SearchFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
}

/// A named search operation failed. Never originates standalone.
#[derive(Debug, Clone, Error)]
#[error("search error for query '{query}' during {operation}: {source}")]
pub struct SearchError {
    pub query: String,
    pub operation: &'static str,
    #[source]
    pub source: SearchFailure,
}

impl SearchError {
    pub fn new(
        query: impl Into<String>,
        operation: &'static str,
        source: impl Into<SearchFailure>,
    ) -> Self {
        Self {
            query: query.into(),
            operation,
            source: source.into(),
        }
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match &self.source {
            SearchFailure::Validation(e) => Some(e),
            SearchFailure::DataLoad(_) => None,
        }
    }

    pub fn data_load(&self) -> Option<&DataLoadError> {
        match &self.source {
            SearchFailure::DataLoad(e) => Some(e),
            SearchFailure::Validation(_) => None,
        }
    }
}

/// Reserved for cache backends that can fail. [`crate::cache::MemoryCache`]
/// never produces it.
#[derive(Debug, Clone, Error)]
#[error("cache error during {operation} for key '{key}': {source}")]
pub struct CacheError {
    pub operation: &'static str,
    pub key: String,
    #[source]
    pub source: Arc<dyn std::error::Error + Send + Sync>,
}

impl CacheError {
    pub fn new(
        operation: &'static str,
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            operation,
            key: key.into(),
            source: Arc::new(source),
        }
    }
}

/// A caller was turned away by the [`crate::limits::Gatekeeper`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("rate limit exceeded for caller '{caller}'")]
    RateLimited { caller: String },
    #[error("resources exhausted: cannot reserve {requested_mb} MB")]
    ResourcesExhausted { requested_mb: u64 },
}

/// Umbrella error for callers that do not care which layer failed.
#[derive(Debug, Error)]
pub enum CityTzError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Encode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, CityTzError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn validation_message_includes_value_only_when_present() {
        let bare = ValidationError::new("input", ValidationKind::InvalidEncoding);
        assert_eq!(
            bare.to_string(),
            "validation error for field 'input': input contains invalid UTF-8"
        );

        let with_value = ValidationError::new("iso_code", ValidationKind::InvalidIso2)
            .with_value("U1");
        assert_eq!(
            with_value.to_string(),
            "validation error for field 'iso_code': invalid ISO2 country code format (value: U1)"
        );
        assert_eq!(with_value.message(), "invalid ISO2 country code format");
    }

    #[test]
    fn validation_error_is_a_leaf_error() {
        let err: Box<dyn std::error::Error> = Box::new(
            ValidationError::new("input", ValidationKind::SuspiciousPattern { category: "path traversal" })
                .with_value("../x"),
        );
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "validation error for field 'input': input contains a suspicious pattern (path traversal) (value: ../x)"
        );
    }

    #[test]
    fn search_error_exposes_its_cause() {
        let inner = ValidationError::new("input", ValidationKind::TooLong { len: 101, max: 100 });
        let err = SearchError::new("x", "lookup_exact", inner.clone());

        assert_eq!(err.validation(), Some(&inner));
        assert!(err.data_load().is_none());
        assert!(err.to_string().starts_with("search error for query 'x' during lookup_exact"));
        assert!(err.source().is_some());
    }

    #[test]
    fn data_load_error_clones_share_the_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DataLoadError::new("open", io);
        let copy = err.clone();

        assert!(Arc::ptr_eq(&err.source, &copy.source));
        assert!(matches!(copy.failure(), LoadFailure::Io(_)));
        assert!(err.to_string().contains("during open"));
    }

    #[test]
    fn cache_error_reports_operation_and_key() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "backend down");
        let err = CacheError::new("get", "city:chicago", io);
        assert_eq!(
            err.to_string(),
            "cache error during get for key 'city:chicago': backend down"
        );
    }
}
