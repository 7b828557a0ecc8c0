//! Document-wide address views.

use authbook_types::{normalize_address, Credential, Document, OrderedMap};
use tracing::debug;

/// One credential per address across every project and file.
///
/// Explicit `by_address` entries are considered first, in document order;
/// `by_order` entries then fill any addresses still missing. Blank
/// credentials never count, and the first credential found for an address
/// is kept.
pub fn flatten_by_address(document: &Document) -> OrderedMap<Credential> {
    let mut flattened = OrderedMap::new();

    for (_, _, node) in document.nodes() {
        for (raw, credential) in &node.by_address {
            let address = normalize_address(raw);
            if address.is_empty() || credential.is_blank() || flattened.contains_key(address) {
                continue;
            }
            flattened.insert(address.to_string(), credential.clone());
        }
    }

    for (_, _, node) in document.nodes() {
        for entry in &node.by_order {
            let address = normalize_address(&entry.address);
            if address.is_empty() || entry.is_blank() || flattened.contains_key(address) {
                continue;
            }
            flattened.insert(address.to_string(), entry.credential());
        }
    }

    debug!(addresses = flattened.len(), "flattened accounts by address");
    flattened
}

/// Every positional credential per address, in document scan order.
///
/// Only `by_order` histories contribute. Entries with a blank address or a
/// blank credential are skipped.
pub fn group_by_address_ordered(document: &Document) -> OrderedMap<Vec<Credential>> {
    let mut grouped: OrderedMap<Vec<Credential>> = OrderedMap::new();

    for (_, _, node) in document.nodes() {
        for entry in &node.by_order {
            let address = normalize_address(&entry.address);
            if address.is_empty() || entry.is_blank() {
                continue;
            }
            grouped
                .entry(address.to_string())
                .or_default()
                .push(entry.credential());
        }
    }

    debug!(addresses = grouped.len(), "grouped ordered accounts by address");
    grouped
}
