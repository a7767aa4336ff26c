//! Testing utilities for stores
//!
//! - **RecordingStore**: journals every call an index makes and can inject
//!   store failures
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use streamdex_core::{BackingStore, RecordId};
//! use streamdex_storage::testing::{RecordingStore, StoreCall};
//!
//! let store: RecordingStore<Value> = RecordingStore::new();
//! store.remove(&RecordId::from(1)).unwrap();
//! assert_eq!(store.calls(), vec![StoreCall::Remove(RecordId::from(1))]);
//! ```

mod recording;

pub use recording::{RecordingStore, StoreCall};
