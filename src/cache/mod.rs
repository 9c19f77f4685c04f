//! Weight-bounded, segmented in-memory content cache
//!
//! [`WeightedCache`] maps canonical template paths to their full text. It wraps
//! a [`moka::sync::SegmentedCache`]: keys are routed to independently locked
//! segments by hash, and the number of segments is derived from the configured
//! concurrency level. Each segment evicts its least-recently-used entries once
//! its share of the weight capacity is exceeded.
//!
//! # Weight Accounting
//!
//! Every entry weighs `chars(key) + chars(value)`. The total capacity comes from
//! [`CacheConfig::capacity`] and is split evenly across segments.
//!
//! Eviction runs as part of moka's maintenance, which is batched. Reads of
//! [`len`](WeightedCache::len), [`total_weight`](WeightedCache::total_weight)
//! and [`stats`](WeightedCache::stats) run pending maintenance first so they
//! report settled values.
//!
//! # Edge Cases
//!
//! An entry heavier than its segment's budget is admitted and then dropped at
//! the next maintenance pass without displacing the entries already cached.
//!
//! # Examples
//!
//! ```
//! use tiercache::cache::WeightedCache;
//! use tiercache::config::CacheConfig;
//!
//! # fn example() -> Result<(), tiercache::config::ConfigError> {
//! let cache = WeightedCache::new(&CacheConfig::default())?;
//! cache.put("/srv/formatters/view.xml", "<view/>");
//!
//! assert_eq!(cache.get("/srv/formatters/view.xml").as_deref(), Some("<view/>"));
//! assert_eq!(cache.total_weight(), WeightedCache::weigh("/srv/formatters/view.xml", "<view/>"));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::SegmentedCache;
use serde::Serialize;
use tracing::trace;

use crate::config::{CacheConfig, ConfigError};
use crate::constants::{INITIAL_CACHE_CAPACITY, MAX_SEGMENTS};

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries dropped to respect the weight budget
    pub evictions: u64,
    /// Live entries
    pub entries: u64,
    /// Sum of live entry weights
    pub weight: u64,
    /// Configured weight capacity
    pub capacity: u64,
}

impl CacheStats {
    /// Calculate hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Thread-safe, weight-bounded LRU cache from canonical path to file content.
pub struct WeightedCache {
    entries: SegmentedCache<String, String>,
    capacity: u64,
    segments: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: Arc<AtomicU64>,
}

impl std::fmt::Debug for WeightedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedCache")
            .field("capacity", &self.capacity)
            .field("segments", &self.segments)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl WeightedCache {
    /// Builds a cache from validated tunables.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] produced by validating `config`; no cache is
    /// created in that case.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let capacity = config.capacity()?;
        let segments = segment_count(config.segment_request()?, capacity);

        let evictions = Arc::new(AtomicU64::new(0));
        let listener_evictions = Arc::clone(&evictions);

        let entries = SegmentedCache::builder(segments)
            .max_capacity(capacity)
            .initial_capacity(INITIAL_CACHE_CAPACITY)
            .eviction_policy(EvictionPolicy::lru())
            .weigher(|key: &String, value: &String| {
                u32::try_from(Self::weigh(key, value)).unwrap_or(u32::MAX)
            })
            .eviction_listener(move |key: Arc<String>, _value, cause| {
                if matches!(cause, RemovalCause::Size) {
                    listener_evictions.fetch_add(1, Ordering::Relaxed);
                    trace!("Evicted cached template {key}");
                }
            })
            .build();

        tracing::debug!("Created template cache: capacity={capacity}, segments={segments}");

        Ok(Self {
            entries,
            capacity,
            segments,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions,
        })
    }

    /// The weight of an entry: character count of the key plus that of the value.
    pub fn weigh(key: &str, value: &str) -> u64 {
        (key.chars().count() + value.chars().count()) as u64
    }

    /// Returns the cached value for `key`, refreshing its recency.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = self.entries.get(key);
        let counter = if value.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Inserts or replaces an entry. Older entries of the same segment are
    /// evicted at the next maintenance pass if the segment exceeds its share
    /// of the capacity.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Whether `key` is currently cached. Does not count as an access.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Applies buffered reads and writes, including any pending evictions.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    /// Number of live entries.
    pub fn len(&self) -> u64 {
        self.run_pending_tasks();
        self.entries.entry_count()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the weights of all live entries.
    pub fn total_weight(&self) -> u64 {
        self.run_pending_tasks();
        self.entries.weighted_size()
    }

    /// The configured weight capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of independently locked segments.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        self.run_pending_tasks();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.entry_count(),
            weight: self.entries.weighted_size(),
            capacity: self.capacity,
        }
    }
}

/// Smallest power of two covering `requested`, shrunk until every segment owns
/// at least one unit of weight.
fn segment_count(requested: usize, capacity: u64) -> usize {
    let mut count = requested.clamp(1, MAX_SEGMENTS).next_power_of_two();
    while count > 1 && count as u64 > capacity {
        count >>= 1;
    }
    count
}
