//! # Metrics traits
//!
//! ```text
//!   ┌──────────────────────┐      ┌──────────────────────────┐
//!   │ CoreMetricsRecorder  │      │ LruMetricsReadRecorder   │
//!   │ get/insert/evict/    │      │ (&self, read-lock paths) │
//!   │ clear                │      └──────────────────────────┘
//!   └──────────┬───────────┘
//!              ▼
//!   ┌──────────────────────┐
//!   │ LruMetricsRecorder   │
//!   │ pop_lru/touch        │
//!   └──────────────────────┘
//!
//!   MetricsSnapshotProvider<S>  → tests, benches
//!   MetricsExporter<S>          → monitoring backends
//! ```
//!
//! Recorders are called from inside the cache with the lock already held.
//! `&mut self` recorders run under the write lock; the read recorder runs
//! under a shared lock and must use atomics.

/// Counters every policy records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// Recency-specific counters recorded on `&mut self` paths.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Counters recorded on `&self` paths (`peek`, `peek_lru`, `recency_rank`).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
