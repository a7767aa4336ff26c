//! OrderedIndex: ordered, capacity-bounded identifier index over a backing store
//!
//! ## Design
//!
//! 1. **Identifiers only**: the index owns an ordered list of identifiers.
//!    Payloads live in the backing store; every admitted batch is forwarded
//!    to `BackingStore::add` and every evicted identifier to
//!    `BackingStore::remove`.
//!
//! 2. **Move, never duplicate**: an identifier that arrives again is removed
//!    from its old position and placed where the new batch lands.
//!
//! 3. **Hard capacity ceiling**: after every mutating operation the order
//!    holds at most `capacity` identifiers.
//!
//! 4. **Baseline snapshot**: the store's contents are captured once at
//!    construction. `prune_untracked` removes from the store every tracked
//!    item that was not part of that snapshot.
//!
//! ## Consistency
//!
//! The order is updated before the store is notified and nothing is rolled
//! back if the store fails. Removals made directly against the store by other
//! actors are not observed, so the order can drift from store contents.

use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use streamdex_core::{
    BackingStore, EvictionPolicy, IndexConfig, Record, StoreId, StreamResult,
};

use crate::order::{dedupe_keep_last, remove_value};

/// End of the order a batch is placed at, or evicted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

/// Ordered, capacity-bounded identifier index
///
/// Owned by a single stream session and bound to one store for its lifetime.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde_json::{json, Value};
/// use streamdex_core::{IndexConfig, RecordId};
/// use streamdex_primitives::OrderedIndex;
/// use streamdex_storage::MemoryStore;
///
/// let store: Arc<MemoryStore<Value>> = Arc::new(MemoryStore::new());
/// let mut index = OrderedIndex::with_config(store, IndexConfig::new().with_capacity(2)).unwrap();
///
/// index.prepend_batch([json!({"id": 1})]).unwrap()
///     .prepend_batch([json!({"id": 2})]).unwrap();
/// assert_eq!(index.ids(), &[RecordId::from(2), RecordId::from(1)]);
/// ```
pub struct OrderedIndex<S: BackingStore> {
    id_order: Vec<StoreId<S>>,
    capacity: usize,
    eviction: EvictionPolicy,
    baseline: Vec<S::Item>,
    store: Arc<S>,
}

impl<S: BackingStore> fmt::Debug for OrderedIndex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("id_order", &self.id_order)
            .field("capacity", &self.capacity)
            .field("eviction", &self.eviction)
            .field("baseline_len", &self.baseline.len())
            .finish()
    }
}

impl<S: BackingStore> OrderedIndex<S> {
    /// Create an index with the default configuration (capacity 1000)
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read for the baseline snapshot.
    pub fn new(store: Arc<S>) -> StreamResult<Self> {
        Self::with_config(store, IndexConfig::default())
    }

    /// Create an index with an explicit configuration
    ///
    /// Captures the store's current items as the baseline snapshot. The store
    /// is not modified.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for a zero capacity, or the store's
    /// error if it cannot be read.
    pub fn with_config(store: Arc<S>, config: IndexConfig) -> StreamResult<Self> {
        config.validate()?;
        let baseline = store.all_items()?;
        debug!(
            target: "streamdex::index",
            capacity = config.capacity,
            eviction = ?config.eviction,
            baseline = baseline.len(),
            "Index created"
        );
        Ok(Self {
            id_order: Vec::new(),
            capacity: config.capacity,
            eviction: config.eviction,
            baseline,
            store,
        })
    }

    /// Add a batch at the back of the order
    ///
    /// Records without an identifier are dropped before anything else
    /// happens; they reach neither the order nor the store. Identifiers
    /// already present move to the back. The surviving records are then
    /// forwarded to `BackingStore::add`.
    ///
    /// An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates store errors from eviction or `add`. The order has already
    /// been updated when that happens.
    pub fn append_batch<T>(&mut self, items: T) -> StreamResult<&mut Self>
    where
        T: IntoIterator<Item = S::Item>,
    {
        let mut records: Vec<S::Item> = items.into_iter().collect();
        if records.is_empty() {
            return Ok(self);
        }

        let received = records.len();
        records.retain(|record| record.has_id());
        let dropped = received - records.len();

        let ids = batch_ids(&records);
        debug!(
            target: "streamdex::index",
            admitted = ids.len(),
            dropped,
            "Appending batch"
        );
        self.place(ids, End::Back);
        let evict_from = match self.eviction {
            EvictionPolicy::TrimBack => End::Back,
            EvictionPolicy::KeepNewest => End::Front,
        };
        self.evict(evict_from)?;
        self.notify_add(&records)?;
        Ok(self)
    }

    /// Add a batch at the front of the order
    ///
    /// `items[0]` ends up at position 0. Identifiers already present move to
    /// the front. Records without an identifier cannot be placed in the
    /// order, but unlike `append_batch` they are still forwarded to
    /// `BackingStore::add` with the rest of the batch.
    ///
    /// An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates store errors from eviction or `add`. The order has already
    /// been updated when that happens.
    pub fn prepend_batch<T>(&mut self, items: T) -> StreamResult<&mut Self>
    where
        T: IntoIterator<Item = S::Item>,
    {
        let records: Vec<S::Item> = items.into_iter().collect();
        if records.is_empty() {
            return Ok(self);
        }

        let ids = batch_ids(&records);
        debug!(
            target: "streamdex::index",
            admitted = ids.len(),
            unplaced = records.len() - records.iter().filter(|r| r.has_id()).count(),
            "Prepending batch"
        );
        self.place(ids, End::Front);
        self.evict(End::Back)?;
        self.notify_add(&records)?;
        Ok(self)
    }

    /// Enforce the capacity ceiling by cutting the back of the order
    ///
    /// Every identifier past position `capacity - 1` is dropped from the
    /// order and removed from the store. Returns the evicted identifiers in
    /// order.
    ///
    /// # Errors
    ///
    /// Stops at the first store error. The order is already trimmed; later
    /// evicted identifiers are not sent to the store.
    pub fn trim(&mut self) -> StreamResult<Vec<StoreId<S>>> {
        self.evict(End::Back)
    }

    /// All store items, sorted by their position in the order
    ///
    /// Store items whose identifier is not in the order (or that have none)
    /// sort before every tracked item and keep the store's relative order
    /// among themselves.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be read.
    pub fn all_items_in_order(&self) -> StreamResult<Vec<S::Item>> {
        let ranks = self.ranks();
        self.sorted_items(&ranks)
    }

    /// Store items that the index has admitted, in order
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be read.
    pub fn tracked_items(&self) -> StreamResult<Vec<S::Item>> {
        let ranks = self.ranks();
        let mut items = self.sorted_items(&ranks)?;
        items.retain(|item| item.id().map_or(false, |id| ranks.contains_key(&id)));
        Ok(items)
    }

    /// Remove from the store every tracked item absent from the baseline
    ///
    /// Items are removed one at a time in `tracked_items` order. Returns the
    /// identifiers that were removed.
    ///
    /// The order itself is left untouched, so pruned identifiers stay in it
    /// until evicted, re-added or dropped with `forget`.
    ///
    /// # Errors
    ///
    /// Stops at the first store error.
    pub fn prune_untracked(&self) -> StreamResult<Vec<StoreId<S>>> {
        let baseline: FxHashSet<StoreId<S>> =
            self.baseline.iter().filter_map(|item| item.id()).collect();

        let pruned: Vec<StoreId<S>> = self
            .tracked_items()?
            .iter()
            .filter_map(|item| item.id())
            .filter(|id| !baseline.contains(id))
            .collect();

        debug!(target: "streamdex::index", pruned = pruned.len(), "Pruning untracked items");
        for id in &pruned {
            trace!(target: "streamdex::index", id = ?id, "Pruned");
            self.remove_from_store(id)?;
        }
        Ok(pruned)
    }

    /// Drop an identifier from the order without touching the store
    ///
    /// Returns true if the identifier was present.
    pub fn forget(&mut self, id: &StoreId<S>) -> bool {
        remove_value(&mut self.id_order, id)
    }

    /// Identifiers in order
    pub fn ids(&self) -> &[StoreId<S>] {
        &self.id_order
    }

    /// Number of identifiers in the order
    pub fn len(&self) -> usize {
        self.id_order.len()
    }

    /// Check if the order is empty
    pub fn is_empty(&self) -> bool {
        self.id_order.is_empty()
    }

    /// Whether the identifier is in the order
    pub fn contains(&self, id: &StoreId<S>) -> bool {
        self.id_order.contains(id)
    }

    /// Position of the identifier in the order
    pub fn position(&self, id: &StoreId<S>) -> Option<usize> {
        self.id_order.iter().position(|candidate| candidate == id)
    }

    /// Maximum number of identifiers retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Eviction policy applied by batches
    pub fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    /// Store contents captured at construction
    pub fn baseline(&self) -> &[S::Item] {
        &self.baseline
    }

    /// The backing store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Place batch identifiers at one end, moving any that are already present
    fn place(&mut self, ids: Vec<StoreId<S>>, end: End) {
        {
            let incoming: FxHashSet<&StoreId<S>> = ids.iter().collect();
            self.id_order.retain(|id| !incoming.contains(id));
        }
        match end {
            End::Back => self.id_order.extend(ids),
            End::Front => {
                self.id_order.splice(0..0, ids);
            }
        }
    }

    /// Cut the order back to capacity from one end and remove evictees from the store
    fn evict(&mut self, end: End) -> StreamResult<Vec<StoreId<S>>> {
        let excess = self.id_order.len().saturating_sub(self.capacity);
        if excess == 0 {
            return Ok(Vec::new());
        }

        let evicted: Vec<StoreId<S>> = match end {
            End::Back => self.id_order.split_off(self.capacity),
            End::Front => self.id_order.drain(..excess).collect(),
        };
        debug!(
            target: "streamdex::index",
            evicted = evicted.len(),
            from = ?end,
            "Trimmed to capacity"
        );
        for id in &evicted {
            trace!(target: "streamdex::index", id = ?id, "Evicted");
            self.remove_from_store(id)?;
        }
        Ok(evicted)
    }

    fn notify_add(&self, records: &[S::Item]) -> StreamResult<()> {
        self.store.add(records).map_err(|e| {
            warn!(target: "streamdex::index", error = %e, "Store add failed");
            e
        })
    }

    fn remove_from_store(&self, id: &StoreId<S>) -> StreamResult<()> {
        self.store.remove(id).map_err(|e| {
            warn!(target: "streamdex::index", id = ?id, error = %e, "Store remove failed");
            e
        })
    }

    /// Position of each identifier in the order
    fn ranks(&self) -> FxHashMap<&StoreId<S>, usize> {
        self.id_order
            .iter()
            .enumerate()
            .map(|(pos, id)| (id, pos))
            .collect()
    }

    fn sorted_items(&self, ranks: &FxHashMap<&StoreId<S>, usize>) -> StreamResult<Vec<S::Item>> {
        let mut items = self.store.all_items()?;
        items.sort_by_cached_key(|item| item.id().and_then(|id| ranks.get(&id).copied()));
        Ok(items)
    }
}

/// Identifiers of a batch, deduplicated, in placement order
fn batch_ids<I: Record>(records: &[I]) -> Vec<I::Id> {
    dedupe_keep_last(records.iter().filter_map(|record| record.id()).collect())
}
