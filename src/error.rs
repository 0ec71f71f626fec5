//! Error types for lrukit.
//!
//! - [`ConfigError`]: construction parameters were rejected (zero capacity).
//! - [`InvariantError`]: `check_invariants` found the lookup table and the
//!   recency list out of sync.
//!
//! Missing keys are not errors; lookups report them through `Option`/`bool`.
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCore;
//!
//! let cache: Result<LruCore<u64, String>, ConfigError> = LruCore::try_new(64);
//! assert!(cache.is_ok());
//!
//! let err = LruCore::<u64, String>::try_new(0).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Returned by fallible constructors and `try_build` when a parameter is
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new("cache capacity must be greater than zero")
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Returned by `check_invariants` when the cache's internal structures
/// disagree. Carries a description of the failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
