//! citytz prelude: bring the common types and traits into scope.

pub use crate::cache::{MemoryCache, ResultCache};
pub use crate::common::DbStats;
pub use crate::dataset::Dataset;
pub use crate::error::{
    AdmissionError, CacheError, CityTzError, DataLoadError, Result, SearchError, ValidationError,
    ValidationKind,
};
pub use crate::filter::{filter_by_country, filter_by_timezone, limit};
pub use crate::limits::{Gatekeeper, LimitsConfig, RateLimiter, ResourceManager};
pub use crate::loader::{DataSource, DatasetFile, InMemory};
#[cfg(feature = "json")]
pub use crate::loader::JsonBytes;
pub use crate::model::{Record, SearchOptions};
pub use crate::search::{SearchConfig, SearchEngine};
