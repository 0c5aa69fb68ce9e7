use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

/// Fixed-capacity least-recently-used cache, safe to share between threads.
///
/// The key map and the recency order live in one `LruCache` behind one mutex,
/// so every operation (including the promotion done by [`get`](Self::get))
/// observes and leaves both in a consistent state. Entries that were last
/// used at the same point are evicted in insertion order.
pub struct BoundedCache<K: Hash + Eq, V> {
    inner: Mutex<LruCache<K, V>>
}

impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    /// Creates a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        BoundedCache {
            inner: Mutex::new(LruCache::new(capacity))
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    /// Returns a clone of the cached value and marks it most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Inserts or replaces `key`, making it most recently used.
    ///
    /// A new key on a full cache evicts the least recently used entry first.
    /// Returns the replaced value when `key` was already present.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// Returns the cached value or computes, stores and returns a new one.
    ///
    /// `compute` runs without holding the lock, so two callers missing the same
    /// key may both compute it; the later insert wins. Callers must only cache
    /// deterministic values.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }

    /// Presence check that leaves the recency order untouched.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn absent_key_is_none() {
        let cache: BoundedCache<&str, i32> = BoundedCache::new(2);
        assert_eq!(cache.get(&"a"), None);
        cache.put("a", 0);
        assert_eq!(cache.get(&"a"), Some(0));
    }

    #[test]
    fn overflow_evicts_least_recently_inserted() {
        let cache = BoundedCache::new(3);
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            cache.put(key, i);
        }
        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b") && cache.contains(&"c") && cache.contains(&"d"));
    }

    #[test]
    fn get_protects_from_next_eviction() {
        let cache = BoundedCache::new(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.get(&"a"), Some(1));
        cache.put("d", 4);
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn contains_does_not_refresh() {
        let cache = BoundedCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert!(cache.contains(&"a"));
        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
    }

    #[test]
    fn put_existing_key_replaces_and_refreshes() {
        let cache = BoundedCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("a", 10), Some(1));
        assert_eq!(cache.len(), 2);
        cache.put("c", 3);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn get_or_insert_with_computes_once_per_miss() {
        let cache = BoundedCache::new(2);
        let mut calls = 0;
        assert_eq!(cache.get_or_insert_with(7, || { calls += 1; 49 }), 49);
        assert_eq!(cache.get_or_insert_with(7, || { calls += 1; 0 }), 49);
        assert_eq!(calls, 1);
    }

    #[test]
    fn zero_capacity_holds_one_entry() {
        let cache = BoundedCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&2), Some("two"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_access_stays_bounded() {
        let cache = Arc::new(BoundedCache::new(8));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..1000 {
                        let key = (t * 1000 + i) % 50;
                        let value = cache.get_or_insert_with(key, || key * 2);
                        assert_eq!(value, key * 2);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}
