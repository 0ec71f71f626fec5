pub use crate::builder::LruCacheBuilder;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::LruCore;
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
