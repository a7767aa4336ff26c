//! Core types and traits for streamdex
//!
//! This crate defines the foundational types used throughout the system:
//! - Record: anything carrying an optional identifier
//! - RecordId: integer or string identifier
//! - BackingStore: the external item store an index sits in front of
//! - IndexConfig: capacity and eviction configuration
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod record;
pub mod traits;

pub use config::{EvictionPolicy, IndexConfig, IndexConfigError, DEFAULT_CAPACITY};
pub use error::{Error, StreamResult};
pub use record::{Record, RecordId};
pub use traits::{BackingStore, StoreId};
