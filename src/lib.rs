//! lrukit: a fixed-capacity, thread-safe least-recently-used cache.
//!
//! The cache pairs a hash map (key → value + list handle) with a recency list
//! whose nodes live in an index-addressed arena, giving O(1) `get`, `insert`,
//! `remove` and eviction without raw pointers.
//!
//! - [`policy::lru::LruCore`]: single-threaded engine.
//! - [`policy::lru::ConcurrentLruCache`]: the engine behind one
//!   `parking_lot::RwLock` (feature `concurrency`, on by default).
//! - [`builder::LruCacheBuilder`]: validated construction.
//! - `metrics`: operation counters and Prometheus text export (feature
//!   `metrics`).
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let cache = ConcurrentLruCache::new(3);
//! cache.insert(1, "a");
//! cache.insert(2, "b");
//! cache.insert(3, "c");
//! cache.get(&1);
//! cache.insert(4, "d");
//!
//! assert!(cache.get(&2).is_none());
//! assert_eq!(cache.get(&1).as_deref(), Some(&"a"));
//! assert_eq!(cache.len(), 3);
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
