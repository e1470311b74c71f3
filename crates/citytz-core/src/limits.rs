// crates/citytz-core/src/limits.rs

//! Admission control: per-caller rate limiting and a global resource budget.
//!
//! Nothing here is wired into [`crate::search::SearchEngine`]. Callers that
//! want bounded search wrap their engine calls in [`Gatekeeper::run`].

use crate::error::AdmissionError;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::debug;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Requests allowed per caller within `window`.
    pub rate_limit: usize,
    pub window: Duration,
    pub max_memory_mb: u64,
    pub max_concurrent_searches: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            rate_limit: 100,
            window: Duration::from_secs(60),
            max_memory_mb: 500,
            max_concurrent_searches: 50,
        }
    }
}

impl LimitsConfig {
    pub fn rate_limit(mut self, limit: usize) -> Self {
        self.rate_limit = limit;
        self
    }

    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn max_memory_mb(mut self, mb: u64) -> Self {
        self.max_memory_mb = mb;
        self
    }

    pub fn max_concurrent_searches(mut self, n: usize) -> Self {
        self.max_concurrent_searches = n;
        self
    }
}

// -----------------------------------------------------------------------------
// RATE LIMITER
// -----------------------------------------------------------------------------

/// Sliding-window limiter keyed by caller identity.
#[derive(Debug)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    requests: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            requests: Mutex::new(HashMap::new()),
        }
    }

    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// [`allow`](Self::allow) with an explicit clock.
    ///
    /// Timestamps at or before `now - window` are dropped. A rejected call
    /// records nothing.
    pub fn allow_at(&self, key: &str, now: Instant) -> bool {
        let mut requests = self.requests.lock();
        let stamps = requests.entry(key.to_string()).or_default();

        if let Some(cutoff) = now.checked_sub(self.window) {
            stamps.retain(|t| *t > cutoff);
        }

        if stamps.len() < self.limit {
            stamps.push_back(now);
            true
        } else {
            debug!(caller = key, limit = self.limit, "rate limit reached");
            false
        }
    }

    /// Number of callers with recorded history.
    pub fn tracked_keys(&self) -> usize {
        self.requests.lock().len()
    }
}

// -----------------------------------------------------------------------------
// RESOURCE MANAGER
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceUsage {
    pub memory_mb: u64,
    pub active_searches: usize,
}

/// Global memory budget and concurrent-search counter.
#[derive(Debug)]
pub struct ResourceManager {
    max_memory_mb: u64,
    max_searches: usize,
    usage: RwLock<ResourceUsage>,
}

impl ResourceManager {
    pub fn new(max_memory_mb: u64, max_concurrent_searches: usize) -> Self {
        Self {
            max_memory_mb,
            max_searches: max_concurrent_searches,
            usage: RwLock::new(ResourceUsage::default()),
        }
    }

    /// Whether there is any headroom at all. Does not reserve anything.
    pub fn can_allocate(&self) -> bool {
        let usage = self.usage.read();
        usage.memory_mb < self.max_memory_mb && usage.active_searches < self.max_searches
    }

    /// Reserves `mb` and one search slot, or nothing.
    pub fn allocate(&self, mb: u64) -> bool {
        let mut usage = self.usage.write();
        let fits = usage
            .memory_mb
            .checked_add(mb)
            .is_some_and(|total| total <= self.max_memory_mb);
        if !fits || usage.active_searches >= self.max_searches {
            debug!(requested_mb = mb, ?usage, "resource allocation refused");
            return false;
        }
        usage.memory_mb += mb;
        usage.active_searches += 1;
        true
    }

    pub fn release(&self, mb: u64) {
        let mut usage = self.usage.write();
        usage.memory_mb = usage.memory_mb.saturating_sub(mb);
        usage.active_searches = usage.active_searches.saturating_sub(1);
    }

    /// Scoped [`allocate`](Self::allocate): the guard releases on drop.
    pub fn try_acquire(&self, mb: u64) -> Option<ResourceGuard<'_>> {
        self.allocate(mb).then_some(ResourceGuard { manager: self, mb })
    }

    pub fn usage(&self) -> ResourceUsage {
        *self.usage.read()
    }
}

/// Holds an allocation from a [`ResourceManager`] until dropped.
#[must_use = "the allocation is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ResourceGuard<'a> {
    manager: &'a ResourceManager,
    mb: u64,
}

impl ResourceGuard<'_> {
    pub fn megabytes(&self) -> u64 {
        self.mb
    }
}

impl Drop for ResourceGuard<'_> {
    fn drop(&mut self) {
        self.manager.release(self.mb);
    }
}

// -----------------------------------------------------------------------------
// GATEKEEPER
// -----------------------------------------------------------------------------

/// Rate limiter and resource budget composed in front of arbitrary work.
#[derive(Debug)]
pub struct Gatekeeper {
    limiter: RateLimiter,
    resources: ResourceManager,
}

impl Gatekeeper {
    pub fn new(config: LimitsConfig) -> Self {
        Self {
            limiter: RateLimiter::new(config.rate_limit, config.window),
            resources: ResourceManager::new(config.max_memory_mb, config.max_concurrent_searches),
        }
    }

    /// Runs `f` if `caller` is within its rate and `mb` fits the budget.
    ///
    /// The rate-limit slot is spent even when the resource check then fails.
    pub fn run<T>(
        &self,
        caller: &str,
        mb: u64,
        f: impl FnOnce() -> T,
    ) -> Result<T, AdmissionError> {
        if !self.limiter.allow(caller) {
            return Err(AdmissionError::RateLimited {
                caller: caller.to_string(),
            });
        }
        let _guard = self
            .resources
            .try_acquire(mb)
            .ok_or(AdmissionError::ResourcesExhausted { requested_mb: mb })?;
        Ok(f())
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }
}

impl Default for Gatekeeper {
    fn default() -> Self {
        Self::new(LimitsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn limiter_slides_its_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        let t0 = Instant::now();

        assert!(limiter.allow_at("alice", t0));
        assert!(limiter.allow_at("alice", t0 + Duration::from_secs(1)));
        assert!(!limiter.allow_at("alice", t0 + Duration::from_secs(2)));

        // Exactly one window after the first call, that call has expired.
        assert!(limiter.allow_at("alice", t0 + Duration::from_secs(10)));
        assert!(!limiter.allow_at("alice", t0 + Duration::from_secs(10)));
    }

    #[test]
    fn limiter_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.allow_at("a", now));
        assert!(!limiter.allow_at("a", now));
        assert!(limiter.allow_at("b", now));
        assert_eq!(limiter.tracked_keys(), 2);
    }

    #[test]
    fn zero_limit_rejects_everything() {
        let limiter = RateLimiter::new(0, Duration::from_secs(1));
        assert!(!limiter.allow("anyone"));
    }

    #[test]
    fn allocation_respects_both_bounds() {
        let manager = ResourceManager::new(100, 2);
        assert!(manager.allocate(60));
        assert!(!manager.allocate(50));
        assert_eq!(
            manager.usage(),
            ResourceUsage {
                memory_mb: 60,
                active_searches: 1
            }
        );

        assert!(manager.allocate(40));
        assert!(!manager.can_allocate());
        assert!(!manager.allocate(0));

        manager.release(60);
        manager.release(40);
        assert_eq!(manager.usage(), ResourceUsage::default());
    }

    #[test]
    fn release_saturates() {
        let manager = ResourceManager::new(10, 1);
        manager.release(5);
        assert_eq!(manager.usage(), ResourceUsage::default());
    }

    #[test]
    fn guard_releases_on_drop() {
        let manager = ResourceManager::new(10, 1);
        {
            let guard = manager.try_acquire(7).unwrap();
            assert_eq!(guard.megabytes(), 7);
            assert!(manager.try_acquire(1).is_none());
        }
        assert_eq!(manager.usage(), ResourceUsage::default());
    }

    #[test]
    fn concurrent_allocations_never_overshoot() {
        let manager = Arc::new(ResourceManager::new(50, 8));
        let peak = Arc::new(AtomicUsize::new(0));

        std::thread::scope(|s| {
            for _ in 0..16 {
                let manager = manager.clone();
                let peak = peak.clone();
                s.spawn(move || {
                    for _ in 0..200 {
                        if let Some(_guard) = manager.try_acquire(5) {
                            let usage = manager.usage();
                            assert!(usage.memory_mb <= 50);
                            assert!(usage.active_searches <= 8);
                            peak.fetch_max(usage.active_searches, Ordering::SeqCst);
                        }
                    }
                });
            }
        });

        assert_eq!(manager.usage(), ResourceUsage::default());
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn gatekeeper_rejects_in_order() {
        let gate = Gatekeeper::new(
            LimitsConfig::default()
                .rate_limit(2)
                .max_memory_mb(10)
                .max_concurrent_searches(1),
        );

        assert_eq!(gate.run("cli", 5, || 42), Ok(42));
        assert_eq!(
            gate.run("cli", 20, || 0),
            Err(AdmissionError::ResourcesExhausted { requested_mb: 20 })
        );
        assert_eq!(
            gate.run("cli", 5, || 0),
            Err(AdmissionError::RateLimited {
                caller: "cli".into()
            })
        );
        assert_eq!(gate.resources().usage(), ResourceUsage::default());
    }
}
