// crates/citytz-core/src/lib.rs

//! # citytz-core
//!
//! In-memory lookup of cities, their countries and their timezones.
//!
//! The dataset is loaded once, lazily, from a [`loader::DataSource`] and then
//! shared read-only by every query. Queries go through a [`SearchEngine`],
//! which validates input and memoizes exact city lookups. Admission control
//! ([`limits::Gatekeeper`]) is a separate layer the caller composes around
//! the engine.
//!
//! ```no_run
//! use citytz_core::prelude::*;
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::new(DatasetFile::bundled()));
//! let engine = SearchEngine::new(dataset);
//!
//! for city in engine.lookup_exact("chicago")? {
//!     println!("{} -> {}", city.name(), city.timezone());
//! }
//! # Ok::<(), citytz_core::CityTzError>(())
//! ```

pub mod cache;
pub mod common;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod limits;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod search;
pub mod validate;

// Raw input shapes, shared by the JSON loader and the snapshot builder.
#[cfg(feature = "json")]
#[doc(hidden)]
pub mod raw;

pub use crate::common::DbStats;
pub use crate::dataset::Dataset;
pub use crate::error::{
    AdmissionError, CacheError, CityTzError, DataLoadError, Result, SearchError, ValidationError,
};
pub use crate::model::{Record, SearchOptions};
pub use crate::search::{SearchConfig, SearchEngine};
