//! Shared test utilities for the integration test suites.
//!
//! Import via `mod common;`.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use serde_json::{json, Value};
use streamdex::testing::RecordingStore;
use streamdex::{EvictionPolicy, IndexConfig, OrderedIndex, RecordId};
use tracing_subscriber::filter::LevelFilter;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a fmt subscriber that writes through the test harness.
///
/// The index logs under the `streamdex::index` target.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(LevelFilter::TRACE)
            .try_init();
    });
}

// ============================================================================
// Records
// ============================================================================

pub type TestIndex = OrderedIndex<RecordingStore<Value>>;

pub fn rid(n: i64) -> RecordId {
    RecordId::Int(n)
}

pub fn rids(ns: &[i64]) -> Vec<RecordId> {
    ns.iter().map(|n| rid(*n)).collect()
}

pub fn rec(n: i64) -> Value {
    json!({ "id": n, "title": format!("item {}", n) })
}

pub fn recs(ns: &[i64]) -> Vec<Value> {
    ns.iter().map(|n| rec(*n)).collect()
}

/// Build a recording store holding `baseline` and an index over it.
pub fn setup(
    capacity: usize,
    eviction: EvictionPolicy,
    baseline: &[i64],
) -> (Arc<RecordingStore<Value>>, TestIndex) {
    init_tracing();
    let store = Arc::new(RecordingStore::with_items(recs(baseline)));
    let config = IndexConfig::new()
        .with_capacity(capacity)
        .with_eviction(eviction);
    let index = OrderedIndex::with_config(Arc::clone(&store), config)
        .expect("valid config over a readable store");
    (store, index)
}

// ============================================================================
// Reference model
// ============================================================================

/// Batch operation applied to both the index and the reference model
#[derive(Debug, Clone)]
pub enum Op {
    Append(Vec<i64>),
    Prepend(Vec<i64>),
}

/// Straightforward model of the identifier order
///
/// Uses linear scans and explicit loops so it shares no code with the index.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    pub order: Vec<i64>,
    pub capacity: usize,
    pub eviction: EvictionPolicy,
    pub evicted: Vec<i64>,
}

impl ReferenceModel {
    pub fn new(capacity: usize, eviction: EvictionPolicy) -> Self {
        ReferenceModel {
            order: Vec::new(),
            capacity,
            eviction,
            evicted: Vec::new(),
        }
    }

    pub fn apply(&mut self, op: &Op) {
        match op {
            Op::Append(batch) => {
                if batch.is_empty() {
                    return;
                }
                for n in batch {
                    if let Some(pos) = self.order.iter().position(|x| x == n) {
                        self.order.remove(pos);
                    }
                    self.order.push(*n);
                }
                let from_front = self.eviction == EvictionPolicy::KeepNewest;
                self.trim(from_front);
            }
            Op::Prepend(batch) => {
                if batch.is_empty() {
                    return;
                }
                let mut placed: Vec<i64> = Vec::new();
                for n in batch {
                    if let Some(pos) = self.order.iter().position(|x| x == n) {
                        self.order.remove(pos);
                    }
                    if let Some(pos) = placed.iter().position(|x| x == n) {
                        placed.remove(pos);
                    }
                    placed.push(*n);
                }
                placed.extend(self.order.drain(..));
                self.order = placed;
                self.trim(false);
            }
        }
    }

    fn trim(&mut self, from_front: bool) {
        while self.order.len() > self.capacity {
            let n = if from_front {
                self.order.remove(0)
            } else {
                self.order.remove(self.capacity)
            };
            self.evicted.push(n);
        }
    }

    pub fn ids(&self) -> Vec<RecordId> {
        rids(&self.order)
    }
}

/// Apply an op to a real index
pub fn apply(index: &mut TestIndex, op: &Op) {
    match op {
        Op::Append(batch) => {
            index.append_batch(recs(batch)).expect("store accepts batch");
        }
        Op::Prepend(batch) => {
            index.prepend_batch(recs(batch)).expect("store accepts batch");
        }
    }
}
