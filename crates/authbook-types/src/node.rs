//! The per-(project, file) node and its append-only step history.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::credential::{Credential, OrderedEntry, SlotEntry};
use crate::OrderedMap;

/// All credential views kept for one (project, file) pair.
///
/// Every field is optional on disk; absence is equivalent to empty.
///
/// - `by_address` accretes: writes merge into it, nothing prunes it.
/// - `by_order`, `by_slot` and `product_address_slots` are point-in-time
///   snapshots replaced wholesale by each write that supplies them.
/// - `by_step` only grows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub by_address: OrderedMap<Credential>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_order: Vec<OrderedEntry>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub by_slot: OrderedMap<SlotEntry>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub product_address_slots: OrderedMap<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_step: Vec<StepRecord>,
}

impl Node {
    /// Field names recognised in the structured node layout.
    pub const FIELDS: [&'static str; 5] = [
        "by_address",
        "by_order",
        "by_slot",
        "product_address_slots",
        "by_step",
    ];

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
            && self.by_order.is_empty()
            && self.by_slot.is_empty()
            && self.product_address_slots.is_empty()
            && self.by_step.is_empty()
    }
}

/// A frozen snapshot of a node's four credential views at one automation step.
///
/// Records are never edited once appended. Two records may share a
/// `step_index`; they remain independent entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    #[serde(default)]
    pub step_index: i64,
    #[serde(default)]
    pub step_name: String,
    #[serde(default)]
    pub operation_event: String,
    #[serde(default)]
    pub by_address: OrderedMap<Credential>,
    #[serde(default)]
    pub by_order: Vec<OrderedEntry>,
    #[serde(default)]
    pub by_slot: OrderedMap<SlotEntry>,
    #[serde(default)]
    pub product_address_slots: OrderedMap<String>,
}
