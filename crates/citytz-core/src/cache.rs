// crates/citytz-core/src/cache.rs
use crate::error::CacheError;
use crate::model::Record;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Key/value store for memoized query results.
///
/// Implementations must be safe to share between threads. Backends that can
/// fail report [`CacheError`]; the search engine treats such failures as a
/// cache miss rather than a failed search.
pub trait ResultCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<Record>>, CacheError>;
    fn set(&self, key: &str, value: Vec<Record>) -> Result<(), CacheError>;
    fn clear(&self) -> Result<(), CacheError>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-process cache. Entries live until [`ResultCache::clear`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<Record>>, CacheError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<Record>) -> Result<(), CacheError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str) -> Record {
        Record {
            city: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn set_then_get() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get("city:berlin").unwrap(), None);

        cache.set("city:berlin", vec![city("Berlin")]).unwrap();
        assert_eq!(cache.get("city:berlin").unwrap(), Some(vec![city("Berlin")]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn empty_results_are_cached_too() {
        let cache = MemoryCache::new();
        cache.set("city:atlantis", Vec::new()).unwrap();
        assert_eq!(cache.get("city:atlantis").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn set_overwrites_and_clear_empties() {
        let cache = MemoryCache::new();
        cache.set("k", vec![city("A")]).unwrap();
        cache.set("k", vec![city("B")]).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(vec![city("B")]));

        cache.clear().unwrap();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get("k").unwrap(), None);
    }
}
