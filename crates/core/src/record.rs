//! Records and record identifiers
//!
//! An index never looks inside a record beyond its identifier. Anything that
//! can report an optional identifier can be tracked:
//! - `Record`: the trait the index and the stores are generic over
//! - `RecordId`: a ready-made identifier type (integer or string)
//! - `serde_json::Value`: JSON objects are records keyed by their `"id"` member

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::Hash;

/// An item that may carry an identifier
///
/// `id()` returns `None` for malformed payloads that have no identifier.
/// Such records are filtered by the index instead of being rejected.
pub trait Record: Clone + Send + Sync {
    /// Identifier type, used as a map/set key
    type Id: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync;

    /// The record's identifier, if it has one
    fn id(&self) -> Option<Self::Id>;

    /// Whether the record carries an identifier
    fn has_id(&self) -> bool {
        self.id().is_some()
    }
}

/// Identifier for stream records
///
/// Feeds identify records by number or by string. Any other JSON value found
/// in an `"id"` member (floats, `null`, booleans, arrays, objects) is kept as
/// its compact JSON text so the record is still tracked.
///
/// Variants never compare equal across kinds, even when they render the
/// same (`1` vs `"1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Signed integer identifier
    Int(i64),
    /// Unsigned integer identifier above `i64::MAX`
    UInt(u64),
    /// String identifier
    Str(String),
    /// Any other JSON identifier, as compact JSON text
    ///
    /// Serializes as a JSON string; deserializing a string always yields `Str`.
    Raw(String),
}

impl RecordId {
    /// Identifier for a JSON `"id"` member value
    ///
    /// Integers that fit `i64` become `Int`, larger ones `UInt`, strings
    /// `Str`; everything else is kept verbatim as `Raw`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RecordId::Int(i)
                } else if let Some(u) = n.as_u64() {
                    RecordId::UInt(u)
                } else {
                    RecordId::Raw(n.to_string())
                }
            }
            Value::String(s) => RecordId::Str(s.clone()),
            other => RecordId::Raw(other.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::UInt(n) => write!(f, "{}", n),
            RecordId::Str(s) | RecordId::Raw(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Int(n as i64)
    }
}

impl From<u32> for RecordId {
    fn from(n: u32) -> Self {
        RecordId::Int(n as i64)
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => RecordId::Int(i),
            Err(_) => RecordId::UInt(n),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Str(s)
    }
}

impl Record for Value {
    type Id = RecordId;

    fn id(&self) -> Option<RecordId> {
        self.as_object()
            .and_then(|obj| obj.get("id"))
            .map(RecordId::from_json)
    }
}
