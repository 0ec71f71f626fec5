//! # Least Recently Used (LRU) cache
//!
//! Fixed-capacity cache that evicts the entry touched longest ago. Reads and
//! writes are O(1); nothing in the core uses raw pointers or `unsafe`.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     ConcurrentLruCache<K, V>                         │
//!   │           Arc<parking_lot::RwLock<LruCore<K, Arc<V>>>>               │
//!   └──────────────────────────────────┬───────────────────────────────────┘
//!                                      ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCore<K, V>                               │
//!   │                                                                      │
//!   │   map: FxHashMap<K, Entry<V>>         order: IntrusiveList<K>        │
//!   │   ┌───────┬──────────────────┐                                       │
//!   │   │  key  │ Entry            │        head (MRU)                     │
//!   │   ├───────┼──────────────────┤          │                            │
//!   │   │  "a"  │ { value, id_1 } ─┼──────► [id_1: "a"]                    │
//!   │   │  "b"  │ { value, id_0 } ─┼───┐      ▲ ▼                          │
//!   │   │  "c"  │ { value, id_2 } ─┼─┐ │    [id_2: "c"]                    │
//!   │   └───────┴──────────────────┘ └─┼──►   ▲ ▼                          │
//!   │                                  └──► [id_0: "b"]                    │
//!   │                                         │                            │
//!   │                                       tail (LRU, next to evict)      │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The map owns values and stores the `SlotId` of the key's list node. The
//! list owns the nodes (and a clone of each key, so the tail can be looked up
//! in the map on eviction). Both are mutated together; after any completed
//! operation `map.len() == order.len() <= capacity`.
//!
//! ## Operations
//!
//! | Method           | Complexity | Lock (concurrent) | Notes                         |
//! |------------------|------------|-------------------|-------------------------------|
//! | `insert(k, v)`   | O(1)       | write             | Overwrite or evict-then-add   |
//! | `get(&k)`        | O(1)       | write             | Promotes to MRU               |
//! | `peek(&k)`       | O(1)       | read              | No promotion                  |
//! | `contains(&k)`   | O(1)       | read              | No promotion                  |
//! | `remove(&k)`     | O(1)       | write             |                               |
//! | `touch(&k)`      | O(1)       | write             | Promote without reading       |
//! | `pop_lru()`      | O(1)       | write             |                               |
//! | `peek_lru()`     | O(1)       | read              |                               |
//! | `recency_rank()` | O(n)       | read              | 0 = MRU                       |
//! | `len()`          | O(1)       | read              |                               |
//! | `clear()`        | O(n)       | write             | Drops every entry             |
//!
//! ## Eviction order
//!
//! ```text
//!   capacity = 3
//!
//!   insert 1,2,3      head ─► [3] [2] [1] ◄─ tail
//!   get 1             head ─► [1] [3] [2] ◄─ tail
//!   insert 4          evict [2] first, then
//!                     head ─► [4] [1] [3] ◄─ tail
//! ```
//!
//! Eviction runs before the new key is linked, so the cache never holds more
//! than `capacity` entries, not even inside a single `insert`.
//!
//! ## Capacity
//!
//! Capacity is fixed at construction and must be non-zero. [`LruCore::new`]
//! panics on zero; [`LruCore::try_new`] returns a [`ConfigError`].
//!
//! ## Example
//!
//! ```
//! use lrukit::policy::lru::LruCore;
//! use lrukit::traits::{CoreCache, MutableCache};
//!
//! let mut cache = LruCore::new(2);
//! cache.insert("x", 1);
//! cache.insert("y", 2);
//! cache.get(&"x");
//! cache.insert("z", 3);
//!
//! assert!(!cache.contains(&"y"));
//! assert_eq!(cache.get(&"x"), Some(&1));
//! assert_eq!(cache.remove(&"z"), Some(3));
//! ```

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Capacity used by `Default`.
pub const DEFAULT_CAPACITY: usize = 16;

/// Lookup-table entry: the value plus the handle of the key's recency node.
#[derive(Debug)]
struct Entry<V> {
    value: V,
    node: SlotId,
}

/// Single-threaded LRU cache.
///
/// Not synchronized; wrap in [`ConcurrentLruCache`] (or an external lock) to
/// share between threads.
pub struct LruCore<K, V> {
    map: FxHashMap<K, Entry<V>>,
    order: IntrusiveList<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty cache, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// assert!(LruCore::<u32, u32>::try_new(0).is_err());
    /// assert_eq!(LruCore::<u32, u32>::try_new(4).map(|c| c.capacity()), Ok(4));
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_prealloc(capacity, true)
    }

    pub(crate) fn try_with_prealloc(capacity: usize, prealloc: bool) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        let reserve = if prealloc { capacity } else { 0 };
        log::debug!("creating lru cache (capacity={}, prealloc={})", capacity, prealloc);
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            order: IntrusiveList::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Returns the value for `key` without promoting it.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCore::new(2);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    ///
    /// assert_eq!(cache.peek(&1), Some(&"one"));
    /// cache.insert(3, "three");
    /// assert!(!cache.contains(&1)); // peek did not protect key 1
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let entry = self.map.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();

        Some(&entry.value)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.map.get(key).map(|entry| (key, &entry.value)))
    }

    /// Verifies that the lookup table and the recency list describe the same
    /// set of keys and that the size bound holds.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first mismatch found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "lookup table has {} entries but recency list has {}",
                self.map.len(),
                self.order.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "cache holds {} entries, capacity is {}",
                self.map.len(),
                self.capacity
            )));
        }

        let mut walked = 0usize;
        for id in self.order.iter_ids() {
            walked += 1;
            if walked > self.order.len() {
                return Err(InvariantError::new("cycle in recency list"));
            }
            let key = self
                .order
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling list node {:?}", id)))?;
            match self.map.get(key) {
                Some(entry) if entry.node == id => {},
                Some(entry) => {
                    return Err(InvariantError::new(format!(
                        "entry points at node {:?}, key is linked at {:?}",
                        entry.node, id
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "list node {:?} has no lookup entry",
                        id
                    )));
                },
            }
        }
        if walked != self.order.len() {
            return Err(InvariantError::new(format!(
                "walked {} list nodes, expected {}",
                walked,
                self.order.len()
            )));
        }
        Ok(())
    }

    /// Unlinks the tail and drops its lookup entry.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_back()?;
        let entry = self.map.remove(&key);
        debug_assert!(entry.is_some(), "evicted key missing from lookup table");
        entry.map(|entry| (key, entry.value))
    }

    #[cfg(debug_assertions)]
    fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        if let Err(e) = self.check_invariants() {
            panic!("lru invariant violated: {}", e);
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(entry) = self.map.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = std::mem::replace(&mut entry.value, value);
            self.order.move_to_front(entry.node);

            #[cfg(debug_assertions)]
            self.debug_validate_invariants();

            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if self.evict_lru().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();

                log::trace!(
                    "lru evicted least recently used entry (len={}, capacity={})",
                    self.map.len(),
                    self.capacity
                );
            }
        }

        let node = self.order.push_front(key.clone());
        self.map.insert(key, Entry { value, node });

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(entry) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(entry.node);

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        Some(&entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        log::debug!("clearing lru cache ({} entries)", self.map.len());
        self.map.clear();
        self.order.clear();

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();
    }
}

impl<K, V> MutableCache<K, V> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let entry = self.map.remove(key)?;
        self.order.remove(entry.node);

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        Some(entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.evict_lru()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        Some(popped)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let key = self.order.back()?;
        let entry = self.map.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some((key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(entry) = self.map.get(key) else {
            return false;
        };
        self.order.move_to_front(entry.node);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let target = self.map.get(key)?.node;
        for (rank, id) in self.order.iter_ids().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// ---------------------------------------------------------------------------
// Concurrent wrapper
// ---------------------------------------------------------------------------

/// Thread-safe LRU cache.
///
/// One `parking_lot::RwLock` guards the whole [`LruCore`]; each call takes it
/// exactly once and holds it to completion. Calls that change recency
/// (`get`, `touch`) take the write lock; `len`, `peek` and friends share the
/// read lock. Values are stored as `Arc<V>` so lookups hand out shared
/// ownership without cloning `V`.
///
/// Cloning the cache clones the handle, not the contents.
///
/// ```
/// use std::thread;
/// use lrukit::policy::lru::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::new(100);
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let cache = cache.clone();
///         thread::spawn(move || {
///             for i in 0..10u64 {
///                 cache.insert(t * 10 + i, i);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(cache.len(), 40);
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<RwLock<LruCore<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        Self::from_core(LruCore::new(capacity))
    }

    /// Creates an empty cache, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCore::try_new(capacity).map(Self::from_core)
    }

    /// Wraps an existing core. Entries already in `core` are kept.
    pub fn from_core(core: LruCore<K, Arc<V>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(core)),
        }
    }

    /// Returns a builder for the cache configuration.
    pub fn builder(capacity: usize) -> crate::builder::LruCacheBuilder {
        crate::builder::LruCacheBuilder::new(capacity)
    }

    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// A new key in a full cache evicts the least recently used entry first.
    /// Either way `key` ends up most recently used.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        self.inner.write().insert(key, value)
    }

    /// Inserts an already shared value.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.write().insert(key, value)
    }

    /// Looks up `key` and promotes it to most recently used.
    ///
    /// Takes the write lock, since promotion reorders the recency list.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).map(Arc::clone)
    }

    /// Looks up and promotes `key`, applying `f` to the value under the lock.
    ///
    /// `f` must not call back into this cache.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let mut cache = self.inner.write();
        cache.get(key).map(|value| f(&**value))
    }

    /// Looks up `key` without promoting it. Takes the read lock.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key).map(Arc::clone)
    }

    /// Applies `f` to the value for `key` without promoting it.
    pub fn peek_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let cache = self.inner.read();
        cache.peek(key).map(|value| f(&**value))
    }

    /// Removes `key`. Returns whether it was present.
    pub fn remove(&self, key: &K) -> bool {
        self.inner.write().remove(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn take(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Promotes `key` without reading it.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lru()
    }

    /// Returns the least recently used entry without reordering.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache
            .peek_lru()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    /// Position of `key` in recency order, 0 being most recent.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.inner.read().recency_rank(key)
    }

    /// Keys from most to least recently used, copied under one read lock.
    pub fn keys(&self) -> Vec<K> {
        let cache = self.inner.read();
        cache.iter().map(|(key, _)| key.clone()).collect()
    }

    /// See [`LruCore::check_invariants`].
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }

    pub fn reset_metrics(&self) {
        self.inner.write().reset_metrics();
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> From<LruCore<K, Arc<V>>> for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    fn from(core: LruCore<K, Arc<V>>) -> Self {
        Self::from_core(core)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Send + Sync,
{
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.map.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
