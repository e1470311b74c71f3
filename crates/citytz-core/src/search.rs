// crates/citytz-core/src/search.rs
use crate::cache::{MemoryCache, ResultCache};
use crate::common::DbStats;
use crate::dataset::Dataset;
use crate::error::{DataLoadError, SearchError};
use crate::model::{Record, SearchOptions};
use crate::validate::{
    validate_country_code, validate_query, DEFAULT_MAX_CITY_LEN, DEFAULT_MAX_SEARCH_LEN,
};
use std::sync::Arc;
use tracing::{debug, warn};

const CITY_KEY_PREFIX: &str = "city:";

/// Query length limits applied before any search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_city_len: usize,
    pub max_search_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_city_len: DEFAULT_MAX_CITY_LEN,
            max_search_len: DEFAULT_MAX_SEARCH_LEN,
        }
    }
}

impl SearchConfig {
    pub fn max_city_len(mut self, len: usize) -> Self {
        self.max_city_len = len;
        self
    }

    pub fn max_search_len(mut self, len: usize) -> Self {
        self.max_search_len = len;
        self
    }
}

/// Query layer over a shared [`Dataset`].
///
/// Every method takes `&self`; one engine can serve any number of threads.
/// Exact lookups are memoized in the cache `C`; the other queries always
/// scan. No admission control happens here, see [`crate::limits::Gatekeeper`].
#[derive(Debug)]
pub struct SearchEngine<C: ResultCache = MemoryCache> {
    dataset: Arc<Dataset>,
    cache: C,
    config: SearchConfig,
}

impl SearchEngine<MemoryCache> {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_cache(dataset, MemoryCache::new())
    }
}

impl<C: ResultCache> SearchEngine<C> {
    pub fn with_cache(dataset: Arc<Dataset>, cache: C) -> Self {
        Self {
            dataset,
            cache,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Case-insensitive exact match on the city name.
    pub fn lookup_exact(&self, city: &str) -> Result<Vec<Record>, SearchError> {
        const OP: &str = "lookup_exact";

        let normalized = validate_query(city, self.config.max_city_len)
            .map_err(|e| SearchError::new(city, OP, e))?;
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let needle = normalized.to_lowercase();
        let key = format!("{CITY_KEY_PREFIX}{needle}");

        match self.cache.get(&key) {
            Ok(Some(hit)) => {
                debug!(%key, results = hit.len(), "cache hit");
                return Ok(hit);
            }
            Ok(None) => debug!(%key, "cache miss"),
            Err(err) => warn!(error = %err, "cache read failed; searching uncached"),
        }

        let records = self.records(&normalized, OP)?;
        let found: Vec<Record> = records
            .iter()
            .filter(|r| r.city.to_lowercase() == needle)
            .cloned()
            .collect();

        if let Err(err) = self.cache.set(&key, found.clone()) {
            warn!(error = %err, "cache write failed");
        }
        Ok(found)
    }

    /// Every whitespace-separated term must appear somewhere in
    /// "city state province country".
    pub fn find_partial(&self, text: &str) -> Result<Vec<Record>, SearchError> {
        const OP: &str = "find_partial";

        let normalized = validate_query(text, self.config.max_search_len)
            .map_err(|e| SearchError::new(text, OP, e))?;
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let lowered = normalized.to_lowercase();
        let terms: Vec<&str> = lowered.split_whitespace().collect();

        let records = self.records(&normalized, OP)?;
        Ok(records
            .iter()
            .filter(|r| {
                let haystack = r.partial_haystack();
                terms.iter().all(|t| haystack.contains(t))
            })
            .cloned()
            .collect())
    }

    /// Matches against ISO2 or ISO3, case-insensitively.
    pub fn find_by_country_code(&self, code: &str) -> Result<Vec<Record>, SearchError> {
        const OP: &str = "find_by_country_code";

        let normalized =
            validate_country_code(code).map_err(|e| SearchError::new(code, OP, e))?;
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.records(&normalized, OP)?;
        Ok(records
            .iter()
            .filter(|r| {
                r.iso2.eq_ignore_ascii_case(&normalized) || r.iso3.eq_ignore_ascii_case(&normalized)
            })
            .cloned()
            .collect())
    }

    /// Configurable matcher: any one field matching is enough.
    ///
    /// The query is not validated.
    pub fn search(&self, query: &str, options: SearchOptions) -> Result<Vec<Record>, SearchError> {
        const OP: &str = "search";

        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = if options.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        let matches = |field: &str| {
            let folded;
            let field = if options.case_sensitive {
                field
            } else {
                folded = field.to_lowercase();
                folded.as_str()
            };
            if options.exact_match {
                field == needle
            } else {
                field.contains(needle.as_str())
            }
        };

        let records = self.records(query, OP)?;
        Ok(records
            .iter()
            .filter(|r| r.match_fields().into_iter().any(|f| matches(f)))
            .cloned()
            .collect())
    }

    pub fn all_records(&self) -> Result<Arc<[Record]>, DataLoadError> {
        self.dataset.load()
    }

    pub fn stats(&self) -> Result<DbStats, DataLoadError> {
        self.dataset.stats()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        if let Err(err) = self.cache.clear() {
            warn!(error = %err, "cache clear failed");
        }
    }

    fn records(&self, query: &str, operation: &'static str) -> Result<Arc<[Record]>, SearchError> {
        self.dataset
            .load()
            .map_err(|e| SearchError::new(query, operation, e))
    }
}
