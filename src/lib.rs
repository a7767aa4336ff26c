//! Streamdex - ordered, capacity-bounded identifier index
//!
//! Streamdex tracks which items belong to a stream, in arrival order, in
//! front of an external item store. It keeps at most `capacity` identifiers,
//! moves re-arriving identifiers instead of duplicating them, and can prune
//! from the store everything that arrived after the index was created.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use streamdex::{IndexConfig, MemoryStore, OrderedIndex, RecordId};
//!
//! let store: Arc<MemoryStore<Value>> = Arc::new(MemoryStore::new());
//! let mut index = OrderedIndex::with_config(store, IndexConfig::new().with_capacity(100))?;
//!
//! index.append_batch(vec![json!({"id": 1}), json!({"id": 2})])?
//!     .prepend_batch(vec![json!({"id": 3})])?;
//!
//! assert_eq!(index.ids(), &[RecordId::from(3), RecordId::from(1), RecordId::from(2)]);
//! # Ok::<(), streamdex::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `streamdex-core`: records, the `BackingStore` trait, configuration, errors
//! - `streamdex-storage`: `MemoryStore` and the `testing::RecordingStore`
//! - `streamdex-primitives`: `OrderedIndex`

pub use streamdex_core::*;
pub use streamdex_primitives::{order, OrderedIndex};
pub use streamdex_storage::{testing, MemoryStore};
