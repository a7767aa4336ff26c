//! Storage layer for streamdex
//!
//! This crate provides backing stores for an `OrderedIndex`:
//! - MemoryStore: insertion-ordered in-memory store with `parking_lot::RwLock`
//! - testing::RecordingStore: call-journaling store with failure injection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod testing;

pub use memory::MemoryStore;
