//! Recording store for verifying what an index asks of its store
//!
//! Wraps a `MemoryStore` and journals every mutating call in order. Failure
//! injection lets tests check that store errors propagate through the index.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use streamdex_core::{BackingStore, Error, Record, StreamResult};

use crate::memory::MemoryStore;

/// A mutating call received by a `RecordingStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall<Id> {
    /// `add` with the ids of the records in the batch (`None` for id-less records)
    Add(Vec<Option<Id>>),
    /// `remove` of one identifier
    Remove(Id),
}

/// Backing store that journals calls and can be told to fail
pub struct RecordingStore<I: Record> {
    inner: MemoryStore<I>,
    calls: Mutex<Vec<StoreCall<I::Id>>>,
    fail_adds: AtomicBool,
    fail_removes: AtomicBool,
}

impl<I: Record> Default for RecordingStore<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Record> RecordingStore<I> {
    /// Create an empty recording store
    pub fn new() -> Self {
        Self::wrap(MemoryStore::new())
    }

    /// Create a recording store pre-populated with items
    ///
    /// Pre-population is not journaled.
    pub fn with_items(items: impl IntoIterator<Item = I>) -> Self {
        Self::wrap(MemoryStore::with_items(items))
    }

    fn wrap(inner: MemoryStore<I>) -> Self {
        RecordingStore {
            inner,
            calls: Mutex::new(Vec::new()),
            fail_adds: AtomicBool::new(false),
            fail_removes: AtomicBool::new(false),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &MemoryStore<I> {
        &self.inner
    }

    /// All journaled calls, oldest first
    pub fn calls(&self) -> Vec<StoreCall<I::Id>> {
        self.calls.lock().clone()
    }

    /// Identifiers passed to `remove`, in call order
    pub fn removed_ids(&self) -> Vec<I::Id> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Remove(id) => Some(id.clone()),
                StoreCall::Add(_) => None,
            })
            .collect()
    }

    /// Identifiers passed to `add`, flattened in call order
    pub fn added_ids(&self) -> Vec<Option<I::Id>> {
        self.calls
            .lock()
            .iter()
            .flat_map(|call| match call {
                StoreCall::Add(ids) => ids.clone(),
                StoreCall::Remove(_) => Vec::new(),
            })
            .collect()
    }

    /// Forget all journaled calls
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Make subsequent `add` calls fail after being journaled
    pub fn fail_adds(&self, fail: bool) {
        self.fail_adds.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `remove` calls fail after being journaled
    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }
}

impl<I: Record> BackingStore for RecordingStore<I> {
    type Item = I;

    fn all_items(&self) -> StreamResult<Vec<I>> {
        self.inner.all_items()
    }

    fn add(&self, items: &[I]) -> StreamResult<()> {
        let ids = items.iter().map(|item| item.id()).collect();
        self.calls.lock().push(StoreCall::Add(ids));
        if self.fail_adds.load(Ordering::SeqCst) {
            return Err(Error::store("injected add failure"));
        }
        self.inner.add(items)
    }

    fn remove(&self, id: &I::Id) -> StreamResult<()> {
        self.calls.lock().push(StoreCall::Remove(id.clone()));
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(Error::store(format!("injected remove failure for {:?}", id)));
        }
        self.inner.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use streamdex_core::RecordId;

    #[test]
    fn test_journals_calls_in_order() {
        let store: RecordingStore<Value> = RecordingStore::new();
        store.add(&[json!({"id": 1}), json!({})]).unwrap();
        store.remove(&RecordId::from(1)).unwrap();

        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Add(vec![Some(RecordId::from(1)), None]),
                StoreCall::Remove(RecordId::from(1)),
            ]
        );
        assert_eq!(store.removed_ids(), vec![RecordId::from(1)]);
        assert_eq!(store.added_ids(), vec![Some(RecordId::from(1)), None]);
        assert!(store.inner().is_empty());
    }

    #[test]
    fn test_prepopulation_not_journaled() {
        let store = RecordingStore::with_items(vec![json!({"id": 1})]);
        assert!(store.calls().is_empty());
        assert_eq!(store.all_items().unwrap().len(), 1);
    }

    #[test]
    fn test_injected_failures() {
        let store: RecordingStore<Value> = RecordingStore::new();
        store.fail_adds(true);
        let err = store.add(&[json!({"id": 1})]).unwrap_err();
        assert!(err.is_store());
        assert!(store.inner().is_empty());

        store.fail_adds(false);
        store.add(&[json!({"id": 1})]).unwrap();

        store.fail_removes(true);
        assert!(store.remove(&RecordId::from(1)).is_err());
        assert_eq!(store.inner().len(), 1);
        assert_eq!(store.calls().len(), 3);
    }

    #[test]
    fn test_clear_calls() {
        let store: RecordingStore<Value> = RecordingStore::new();
        store.remove(&RecordId::from(5)).unwrap();
        store.clear_calls();
        assert!(store.calls().is_empty());
    }
}
