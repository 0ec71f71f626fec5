//! Cache configuration.
//!
//! [`LruCacheBuilder`] collects construction parameters and validates them
//! once, at build time.
//!
//! | Setting    | Default  | Effect                                          |
//! |------------|----------|-------------------------------------------------|
//! | `capacity` | required | Maximum entries; must be > 0                    |
//! | `prealloc` | `true`   | Reserve map and list storage for `capacity` up front |
//!
//! ```
//! use lrukit::builder::LruCacheBuilder;
//! use lrukit::traits::CoreCache;
//!
//! let mut core = LruCacheBuilder::new(128)
//!     .prealloc(false)
//!     .build_core::<u64, String>();
//! core.insert(1, "one".to_string());
//! assert_eq!(core.capacity(), 128);
//!
//! assert!(LruCacheBuilder::new(0).try_build_core::<u64, String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
use crate::policy::lru::LruCore;

/// Builder for [`LruCore`] and [`ConcurrentLruCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruCacheBuilder {
    capacity: usize,
    prealloc: bool,
}

impl LruCacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            prealloc: true,
        }
    }

    /// Reserve storage for `capacity` entries at construction.
    ///
    /// Turn off for large, sparsely filled caches.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.prealloc = prealloc;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds a single-threaded cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    pub fn try_build_core<K, V>(&self) -> Result<LruCore<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        LruCore::try_with_prealloc(self.capacity, self.prealloc)
    }

    /// Builds a single-threaded cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build_core`](Self::try_build_core).
    pub fn build_core<K, V>(&self) -> LruCore<K, V>
    where
        K: Clone + Eq + Hash,
    {
        match self.try_build_core() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a thread-safe cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::<String, Vec<u8>>::builder(64)
    ///     .prealloc(true)
    ///     .try_build::<String, Vec<u8>>();
    /// assert!(cache.is_ok());
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn try_build<K, V>(&self) -> Result<ConcurrentLruCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash + Send + Sync,
        V: Send + Sync,
    {
        self.try_build_core().map(ConcurrentLruCache::from_core)
    }

    /// Builds a thread-safe cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build`](Self::try_build).
    #[cfg(feature = "concurrency")]
    pub fn build<K, V>(&self) -> ConcurrentLruCache<K, V>
    where
        K: Clone + Eq + Hash + Send + Sync,
        V: Send + Sync,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}
