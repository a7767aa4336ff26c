//! Primitives layer for streamdex
//!
//! - **OrderedIndex**: ordered, capacity-bounded identifier index in front of
//!   a `BackingStore`
//! - **order**: identifier list helpers (removal by value, in-batch dedupe)
//!
//! ## Design Principle: Identifiers, Not Payloads
//!
//! The index holds identifiers and their order only. Item payloads live in
//! the backing store the index is bound to, which the index drives through
//! `add` and `remove` as batches arrive and entries are evicted or pruned.
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use streamdex_core::RecordId;
//! use streamdex_primitives::OrderedIndex;
//! use streamdex_storage::MemoryStore;
//!
//! let store: Arc<MemoryStore<Value>> = Arc::new(MemoryStore::with_items(vec![json!({"id": 1})]));
//! let mut index = OrderedIndex::new(Arc::clone(&store)).unwrap();
//!
//! index.append_batch(vec![json!({"id": 1}), json!({"id": 2})]).unwrap();
//! let pruned = index.prune_untracked().unwrap();
//!
//! assert_eq!(pruned, vec![RecordId::from(2)]);
//! assert_eq!(store.ids(), vec![RecordId::from(1)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod order;
pub mod ordered_index;

pub use ordered_index::OrderedIndex;
