//! Session cache for loaded budgets.
//!
//! Entries never expire; the only way to drop them is [`BudgetCache::reset`].
//! The clock only stamps entries so callers can report data age.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::model::{BudgetData, BudgetKey};
use crate::source::SourceKind;

/// Time source for cache stamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached budget plus where and when it was obtained.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Arc<BudgetData>,
    pub source: SourceKind,
    pub cached_at: DateTime<Utc>,
}

pub struct BudgetCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl Default for BudgetCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl BudgetCache {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Current time according to the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn get(&self, key: &BudgetKey) -> Option<Arc<BudgetData>> {
        self.lock()
            .get(&key.cache_key())
            .map(|entry| Arc::clone(&entry.data))
    }

    #[must_use]
    pub fn entry(&self, key: &BudgetKey) -> Option<CacheEntry> {
        self.lock().get(&key.cache_key()).cloned()
    }

    /// Store `data` under `key`, replacing any earlier entry (last write wins).
    pub fn insert(&self, key: &BudgetKey, data: BudgetData, source: SourceKind) -> Arc<BudgetData> {
        let data = Arc::new(data);
        let entry = CacheEntry {
            data: Arc::clone(&data),
            source,
            cached_at: self.clock.now(),
        };
        self.lock().insert(key.cache_key(), entry);
        data
    }

    /// Drop every entry.
    pub fn reset(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // No operation leaves the map half-written; a poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_cache() -> BudgetCache {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        BudgetCache::new(Arc::new(FixedClock(at)))
    }

    #[test]
    fn insert_then_get_returns_same_allocation() {
        let cache = fixed_cache();
        let key = BudgetKey::new("Springfield", 2024, "operating");
        let stored = cache.insert(&key, bundled::budget_data(), SourceKind::Bundled);
        let fetched = cache.get(&key).unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
    }

    #[test]
    fn entry_is_stamped_by_clock() {
        let cache = fixed_cache();
        let key = BudgetKey::new("Springfield", 2024, "operating");
        cache.insert(&key, bundled::budget_data(), SourceKind::Snapshot);
        let entry = cache.entry(&key).unwrap();
        assert_eq!(entry.cached_at, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(entry.source, SourceKind::Snapshot);
    }

    #[test]
    fn reset_clears_all_entries() {
        let cache = fixed_cache();
        cache.insert(&BudgetKey::new("A", 2023, "x"), bundled::budget_data(), SourceKind::Bundled);
        cache.insert(&BudgetKey::new("B", 2024, "x"), bundled::budget_data(), SourceKind::Bundled);
        assert_eq!(cache.len(), 2);
        cache.reset();
        assert!(cache.is_empty());
        assert!(cache.get(&BudgetKey::new("A", 2023, "x")).is_none());
    }

    #[test]
    fn keys_differing_only_by_dataset_are_distinct() {
        let cache = fixed_cache();
        cache.insert(&BudgetKey::new("A", 2024, "operating"), bundled::budget_data(), SourceKind::Bundled);
        assert!(cache.get(&BudgetKey::new("A", 2024, "capital")).is_none());
    }
}
