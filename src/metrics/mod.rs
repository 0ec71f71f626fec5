//! Operation counters for the LRU cache (feature `metrics`).
//!
//! Recording, snapshotting and exporting are split into separate traits so
//! the cache core only ever increments counters.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
