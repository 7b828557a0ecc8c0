//! Append-only step history.
//!
//! A step record freezes the four credential views as they were supplied at
//! one automation step. Records are only ever appended; a repeated
//! `step_index` yields a second, independent record.

use authbook_types::normalize;
use authbook_types::{AccountUpdate, Node, StepHeader, StepRecord};
use tracing::debug;

/// Builds and appends [`StepRecord`]s.
pub struct StepRecorder;

impl StepRecorder {
    /// Freeze the supplied views into a record. Each view is normalized on
    /// its own; a missing view is recorded as empty.
    pub fn snapshot(header: &StepHeader, update: &AccountUpdate) -> StepRecord {
        StepRecord {
            step_index: header.index,
            step_name: header.resolved_name(),
            operation_event: header.event.clone(),
            by_address: update
                .accounts
                .as_ref()
                .map(normalize::by_address)
                .unwrap_or_default(),
            by_order: update
                .accounts_list
                .as_deref()
                .map(normalize::by_order)
                .unwrap_or_default(),
            by_slot: update
                .accounts_slots
                .as_ref()
                .map(normalize::by_slot)
                .unwrap_or_default(),
            product_address_slots: update
                .product_address_slots
                .as_ref()
                .map(normalize::address_slots)
                .unwrap_or_default(),
        }
    }

    /// Append a new record to the node's history and return its position.
    pub fn append(node: &mut Node, header: &StepHeader, update: &AccountUpdate) -> usize {
        let record = Self::snapshot(header, update);
        node.by_step.push(record);
        let position = node.by_step.len() - 1;
        debug!(
            step_index = header.index,
            position,
            "step record appended"
        );
        position
    }
}
