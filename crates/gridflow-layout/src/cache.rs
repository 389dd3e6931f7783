#![forbid(unsafe_code)]

//! Memoization cache for layout validation.
//!
//! Validation is O(n²) in item count and the interaction layer tends to ask
//! the same question many times per drag (once per pointer event). The cache
//! keys full-layout validation results on a geometry fingerprint so repeated
//! checks of an unchanged snapshot are a hash lookup.
//!
//! Always an explicit object owned by the caller and passed by `&mut` —
//! never a global. Entries are bounded three ways:
//!
//! - **Capacity**: least-recently-used eviction past `max_entries`.
//! - **TTL**: entries older than `time_to_live` are recomputed on access.
//! - **Generation**: [`ValidationCache::invalidate_all`] bumps a counter
//!   making every existing entry stale in O(1).

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use gridflow_core::{Layout, ValidationError};

use crate::validate::validate_layout;

/// Key for validation lookups: layout fingerprint plus column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidationKey {
    layout_hash: u64,
    cols: i32,
}

impl ValidationKey {
    /// Build the key for a layout/column pair.
    #[must_use]
    pub fn new(layout: &Layout, cols: i32) -> Self {
        Self {
            layout_hash: layout.state_hash(),
            cols,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedValidation {
    result: Result<(), ValidationError>,
    generation: u64,
    inserted_at: Instant,
    last_access: u64,
}

/// Hit/miss counters for telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Bounded, TTL-expiring memo of [`validate_layout`] results.
#[derive(Debug)]
pub struct ValidationCache {
    entries: FxHashMap<ValidationKey, CachedValidation>,
    generation: u64,
    access_clock: u64,
    max_entries: usize,
    time_to_live: Duration,
    hits: u64,
    misses: u64,
}

impl ValidationCache {
    /// Create a cache holding at most `max_entries` results, each valid for
    /// `time_to_live` after insertion.
    ///
    /// A capacity of zero disables caching (every call recomputes).
    #[must_use]
    pub fn new(max_entries: usize, time_to_live: Duration) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(max_entries, Default::default()),
            generation: 0,
            access_clock: 0,
            max_entries,
            time_to_live,
            hits: 0,
            misses: 0,
        }
    }

    /// Validate a layout, reusing a cached result when the snapshot's
    /// fingerprint, column count, generation, and TTL all match.
    pub fn validate(&mut self, layout: &Layout, cols: i32) -> Result<(), ValidationError> {
        let key = ValidationKey::new(layout, cols);
        self.access_clock += 1;

        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
            && entry.inserted_at.elapsed() <= self.time_to_live
        {
            self.hits += 1;
            entry.last_access = self.access_clock;
            return entry.result.clone();
        }

        self.misses += 1;
        let result = validate_layout(layout, cols);

        if self.max_entries > 0 {
            if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
                self.evict_lru();
            }
            self.entries.insert(
                key,
                CachedValidation {
                    result: result.clone(),
                    generation: self.generation,
                    inserted_at: Instant::now(),
                    last_access: self.access_clock,
                },
            );
        }
        result
    }

    /// Drop the least recently used entry.
    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| *key);
        if let Some(key) = victim {
            self.entries.remove(&key);
        }
    }

    /// Make every cached entry stale in O(1).
    #[inline]
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> ValidationCacheStats {
        ValidationCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gridflow_core::GridItem;

    fn layout(n: i32) -> Layout {
        Layout::from_items((0..n).map(|i| GridItem::new(format!("w{i}"), i, 0, 1, 1)))
    }

    fn cache() -> ValidationCache {
        ValidationCache::new(8, Duration::from_secs(60))
    }

    #[test]
    fn repeat_validation_hits() {
        let mut cache = cache();
        let snapshot = layout(3);
        assert!(cache.validate(&snapshot, 12).is_ok());
        assert!(cache.validate(&snapshot, 12).is_ok());
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn different_cols_miss() {
        let mut cache = cache();
        let snapshot = layout(3);
        let _ = cache.validate(&snapshot, 12);
        let _ = cache.validate(&snapshot, 6);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn cached_failures_are_replayed() {
        let mut cache = cache();
        let overlapping = Layout::from_items([
            GridItem::new("a", 0, 0, 2, 2),
            GridItem::new("b", 1, 0, 2, 2),
        ]);
        assert!(cache.validate(&overlapping, 12).is_err());
        assert!(cache.validate(&overlapping, 12).is_err());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn changed_constraints_are_a_distinct_key() {
        let mut cache = cache();
        let relaxed = Layout::from_items([GridItem::new("a", 0, 0, 1, 1)]);
        let tightened = Layout::from_items([GridItem::new("a", 0, 0, 1, 1).with_constraints(
            gridflow_core::SizeConstraints {
                min_w: Some(2),
                ..gridflow_core::SizeConstraints::NONE
            },
        )]);
        assert!(cache.validate(&relaxed, 12).is_ok());
        // Same geometry, tighter constraints: the cached Ok must not replay.
        assert_eq!(
            cache.validate(&tightened, 12),
            validate_layout(&tightened, 12),
        );
        assert!(cache.validate(&tightened, 12).is_err());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn invalidate_all_forces_recompute() {
        let mut cache = cache();
        let snapshot = layout(3);
        let _ = cache.validate(&snapshot, 12);
        cache.invalidate_all();
        let _ = cache.validate(&snapshot, 12);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn expired_entries_recompute() {
        let mut cache = ValidationCache::new(8, Duration::ZERO);
        let snapshot = layout(3);
        let _ = cache.validate(&snapshot, 12);
        std::thread::sleep(Duration::from_millis(2));
        let _ = cache.validate(&snapshot, 12);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let mut cache = ValidationCache::new(2, Duration::from_secs(60));
        let a = layout(1);
        let b = layout(2);
        let c = layout(3);
        let _ = cache.validate(&a, 12);
        let _ = cache.validate(&b, 12);
        let _ = cache.validate(&a, 12); // refresh a; b is now LRU
        let _ = cache.validate(&c, 12); // evicts b
        assert_eq!(cache.stats().entries, 2);
        let _ = cache.validate(&a, 12);
        assert_eq!(cache.stats().hits, 2, "a must have survived eviction");
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut cache = ValidationCache::new(0, Duration::from_secs(60));
        let snapshot = layout(3);
        let _ = cache.validate(&snapshot, 12);
        let _ = cache.validate(&snapshot, 12);
        let stats = cache.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.misses, 2);
    }
}
