//! # Cache trait family
//!
//! ```text
//!   ┌─────────────────────────────────┐
//!   │         CoreCache<K, V>         │  insert, get, contains, len,
//!   │                                 │  is_empty, capacity, clear
//!   └────────────────┬────────────────┘
//!                    ▼
//!   ┌─────────────────────────────────┐
//!   │        MutableCache<K, V>       │  remove, remove_batch
//!   └────────────────┬────────────────┘
//!                    ▼
//!   ┌─────────────────────────────────┐
//!   │        LruCacheTrait<K, V>      │  pop_lru, peek_lru, touch,
//!   │                                 │  recency_rank
//!   └─────────────────────────────────┘
//!
//!   ConcurrentCache: Send + Sync marker for internally synchronized caches
//! ```
//!
//! The traits take `&mut self` and carry no locking of their own. They are
//! implemented by the single-threaded [`LruCore`](crate::policy::lru::LruCore);
//! the concurrent wrapper exposes the same operations through `&self`.

/// Operations every cache supports.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.to_string());
///     }
/// }
///
/// let mut cache = LruCore::new(8);
/// warm(&mut cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// When the key is new and the cache is full, one entry is evicted first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`. May update eviction state (recency for LRU).
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks for `key` without touching eviction state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Drops every entry. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that allow removal of an arbitrary key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was present.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::{CoreCache, MutableCache};
    ///
    /// let mut cache = LruCore::new(4);
    /// cache.insert("k", 1);
    /// assert_eq!(cache.remove(&"k"), Some(1));
    /// assert_eq!(cache.remove(&"k"), None);
    /// ```
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in turn; results are in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-ordered operations.
///
/// ```
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCore::new(3);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.insert(3, "three");
///
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// assert!(cache.touch(&2));
/// assert_eq!(cache.recency_rank(&2), Some(0));
/// assert_eq!(cache.pop_lru(), Some((3, "three")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without reordering.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Promotes `key` to most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, 0 being most recent. O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for caches that are safe to share across threads without an
/// external lock.
pub trait ConcurrentCache: Send + Sync {}
