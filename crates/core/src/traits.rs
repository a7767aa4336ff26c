//! Backing store abstraction
//!
//! The index owns identifiers and their order only. Item payloads live in a
//! backing store, reached through the `BackingStore` trait so any concrete
//! store can sit behind an index.

use std::sync::Arc;

use crate::error::StreamResult;
use crate::record::Record;

/// Identifier type of a store's records
pub type StoreId<S> = <<S as BackingStore>::Item as Record>::Id;

/// External item store behind an index
///
/// Thread safety: methods take `&self`; implementations provide their own
/// interior mutability and must be safe to share (Send + Sync).
///
/// The index never retries or rolls back store calls. An error returned
/// here is propagated to the index caller as-is.
pub trait BackingStore: Send + Sync {
    /// Record type held by the store
    type Item: Record;

    /// Current items, as a snapshot
    ///
    /// The returned vector is owned by the caller and does not follow later
    /// store mutations.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn all_items(&self) -> StreamResult<Vec<Self::Item>>;

    /// Merge the given items into the store
    ///
    /// Must be idempotent: adding an item whose id is already stored replaces
    /// or merges it rather than duplicating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    fn add(&self, items: &[Self::Item]) -> StreamResult<()>;

    /// Remove the item with the given identifier
    ///
    /// No-op if the identifier is not present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the removal.
    fn remove(&self, id: &<Self::Item as Record>::Id) -> StreamResult<()>;
}

impl<S: BackingStore + ?Sized> BackingStore for Arc<S> {
    type Item = S::Item;

    fn all_items(&self) -> StreamResult<Vec<Self::Item>> {
        (**self).all_items()
    }

    fn add(&self, items: &[Self::Item]) -> StreamResult<()> {
        (**self).add(items)
    }

    fn remove(&self, id: &<Self::Item as Record>::Id) -> StreamResult<()> {
        (**self).remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Minimal store used to check the trait is object-friendly through Arc
    struct VecStore(Mutex<Vec<Value>>);

    impl BackingStore for VecStore {
        type Item = Value;

        fn all_items(&self) -> StreamResult<Vec<Value>> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn add(&self, items: &[Value]) -> StreamResult<()> {
            self.0.lock().unwrap().extend(items.iter().cloned());
            Ok(())
        }

        fn remove(&self, id: &RecordId) -> StreamResult<()> {
            self.0.lock().unwrap().retain(|v| v.id().as_ref() != Some(id));
            Ok(())
        }
    }

    #[test]
    fn test_arc_forwards_to_inner_store() {
        let store = Arc::new(VecStore(Mutex::new(Vec::new())));
        let shared: Arc<VecStore> = Arc::clone(&store);

        shared.add(&[json!({"id": 1}), json!({"id": 2})]).unwrap();
        shared.remove(&RecordId::from(1)).unwrap();

        let items = store.all_items().unwrap();
        assert_eq!(items, vec![json!({"id": 2})]);
    }

    #[test]
    fn test_all_items_is_a_snapshot() {
        let store = VecStore(Mutex::new(vec![json!({"id": 1})]));
        let snapshot = store.all_items().unwrap();
        store.add(&[json!({"id": 2})]).unwrap();
        assert_eq!(snapshot.len(), 1);
    }
}
