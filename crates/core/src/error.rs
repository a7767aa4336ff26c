//! Error types for streamdex
//!
//! This module defines the error types shared by every crate in the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Malformed records (records without an identifier) are never an error:
//! the index filters them instead. Errors only come from the backing store
//! or from an invalid configuration.

use thiserror::Error;

use crate::config::IndexConfigError;

/// Result type alias for streamdex operations
pub type StreamResult<T> = std::result::Result<T, Error>;

/// Error types for streamdex
#[derive(Debug, Error)]
pub enum Error {
    /// A backing store operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Index configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] IndexConfigError),
}

impl Error {
    /// Create a store error from any displayable message
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }

    /// Whether this error originated in the backing store
    pub fn is_store(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}
