//! Index configuration.
//!
//! Two tunables: the capacity ceiling of the identifier order, and which end
//! of the order loses entries when a batch pushes it over that ceiling.

use serde::{Deserialize, Serialize};

/// Default maximum number of identifiers retained by an index.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Configuration for an `OrderedIndex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Maximum number of identifiers kept in the order (default: 1000).
    ///
    /// After every mutating operation the order is trimmed back to this
    /// length.
    pub capacity: usize,

    /// Which entries a batch evicts on overflow (default: `TrimBack`).
    pub eviction: EvictionPolicy,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            capacity: DEFAULT_CAPACITY,
            eviction: EvictionPolicy::default(),
        }
    }
}

/// Overflow eviction policy
///
/// A standalone `trim()` always cuts the back of the order; the policy only
/// changes what appends and prepends evict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Everything past `capacity` at the back of the order is evicted,
    /// whichever end the batch was added to. Appending to a full index
    /// therefore evicts the appended entries themselves.
    #[default]
    TrimBack,
    /// Entries at the end opposite the batch are evicted: appends evict from
    /// the front, prepends from the back. The batch just added is kept.
    KeepNewest,
}

impl IndexConfig {
    /// Create a new index configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set capacity (builder pattern).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set eviction policy (builder pattern).
    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), IndexConfigError> {
        if self.capacity == 0 {
            return Err(IndexConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Create a configuration with a small capacity for testing.
    pub fn for_testing() -> Self {
        IndexConfig {
            capacity: 16,
            ..Default::default()
        }
    }
}

/// Index configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexConfigError {
    /// Capacity must be a positive integer.
    #[error("Capacity must be at least 1")]
    ZeroCapacity,
}
