//! MemoryStore: in-memory backing store
//!
//! Items are kept in insertion order in a `Vec` behind a
//! `parking_lot::RwLock`. Re-adding an item with a known identifier replaces
//! it in place, so the store's own order is "first arrival" order, which is
//! independent of the order an index keeps.

use parking_lot::RwLock;
use tracing::debug;

use streamdex_core::{BackingStore, Record, StreamResult};

/// In-memory backing store keyed by record identifier
#[derive(Debug)]
pub struct MemoryStore<I: Record> {
    items: RwLock<Vec<I>>,
}

impl<I: Record> Default for MemoryStore<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Record> MemoryStore<I> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with items
    ///
    /// Goes through the same merge path as `add`, so records without an id
    /// are skipped and repeated ids collapse to their last payload.
    pub fn with_items(items: impl IntoIterator<Item = I>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.items.write();
            for item in items {
                merge(&mut guard, item);
            }
        }
        store
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Whether an item with this identifier is stored
    pub fn contains(&self, id: &I::Id) -> bool {
        self.items
            .read()
            .iter()
            .any(|item| item.id().as_ref() == Some(id))
    }

    /// Clone of the item with this identifier
    pub fn get(&self, id: &I::Id) -> Option<I> {
        self.items
            .read()
            .iter()
            .find(|item| item.id().as_ref() == Some(id))
            .cloned()
    }

    /// Identifiers of stored items, in store order
    pub fn ids(&self) -> Vec<I::Id> {
        self.items.read().iter().filter_map(|item| item.id()).collect()
    }
}

/// Replace an item with the same id in place, or append it
///
/// Returns false when the item has no identifier and was skipped.
fn merge<I: Record>(items: &mut Vec<I>, item: I) -> bool {
    let Some(id) = item.id() else {
        return false;
    };
    match items.iter().position(|existing| existing.id().as_ref() == Some(&id)) {
        Some(pos) => items[pos] = item,
        None => items.push(item),
    }
    true
}

impl<I: Record> BackingStore for MemoryStore<I> {
    type Item = I;

    fn all_items(&self) -> StreamResult<Vec<I>> {
        Ok(self.items.read().clone())
    }

    fn add(&self, items: &[I]) -> StreamResult<()> {
        let mut guard = self.items.write();
        let mut skipped = 0usize;
        for item in items {
            if !merge(&mut guard, item.clone()) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!(target: "streamdex::store", skipped, "Ignored records without id");
        }
        Ok(())
    }

    fn remove(&self, id: &I::Id) -> StreamResult<()> {
        self.items.write().retain(|item| item.id().as_ref() != Some(id));
        Ok(())
    }
}
