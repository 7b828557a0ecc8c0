//! Per-view write paths applied to a single node.
//!
//! Each view is written by its own function so that a merge can never leak
//! into a view that must be replaced, and the other way round.

use authbook_types::normalize;
use authbook_types::{AccountUpdate, Credential, Node, OrderedEntry, OrderedMap, SlotEntry};

/// Apply every view the caller supplied. Views left as `None` are untouched.
pub fn apply(node: &mut Node, update: &AccountUpdate) {
    if let Some(accounts) = &update.accounts {
        merge_by_address(node, accounts);
    }
    if let Some(list) = &update.accounts_list {
        replace_by_order(node, list);
    }
    if let Some(slots) = &update.accounts_slots {
        replace_by_slot(node, slots);
    }
    if let Some(slots) = &update.product_address_slots {
        replace_address_slots(node, slots);
    }
}

/// Merge into `by_address`: supplied addresses overwrite, others are kept.
pub fn merge_by_address(node: &mut Node, accounts: &OrderedMap<Credential>) {
    for (address, credential) in normalize::by_address(accounts) {
        node.by_address.insert(address, credential);
    }
}

/// Replace `by_order` wholesale, duplicates and blank addresses included.
pub fn replace_by_order(node: &mut Node, list: &[OrderedEntry]) {
    node.by_order = normalize::by_order(list);
}

/// Replace `by_slot` wholesale.
pub fn replace_by_slot(node: &mut Node, slots: &OrderedMap<SlotEntry>) {
    node.by_slot = normalize::by_slot(slots);
}

/// Replace `product_address_slots` wholesale.
pub fn replace_address_slots(node: &mut Node, slots: &OrderedMap<String>) {
    node.product_address_slots = normalize::address_slots(slots);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(pairs: &[(&str, &str)]) -> OrderedMap<Credential> {
        pairs
            .iter()
            .map(|(address, email)| (address.to_string(), Credential::new(*email, "123456")))
            .collect()
    }

    #[test]
    fn by_address_merges() {
        let mut node = Node::default();
        merge_by_address(&mut node, &accounts(&[("a", "a1@x.io"), ("b", "b1@x.io")]));
        merge_by_address(&mut node, &accounts(&[("b", "b2@x.io"), ("c", "c1@x.io")]));

        assert_eq!(node.by_address.len(), 3);
        assert_eq!(node.by_address["a"].email, "a1@x.io");
        assert_eq!(node.by_address["b"].email, "b2@x.io");
        assert_eq!(node.by_address["c"].email, "c1@x.io");
        // Overwriting keeps the original position.
        let keys: Vec<&str> = node.by_address.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn by_order_replaces() {
        let mut node = Node::default();
        replace_by_order(
            &mut node,
            &[OrderedEntry::new("a", "1", "p"), OrderedEntry::new("a", "2", "p")],
        );
        replace_by_order(&mut node, &[OrderedEntry::new("b", "3", "p")]);
        assert_eq!(node.by_order, vec![OrderedEntry::new("b", "3", "p")]);
    }

    #[test]
    fn none_views_are_untouched() {
        let mut node = Node::default();
        apply(
            &mut node,
            &AccountUpdate::new()
                .with_list(vec![OrderedEntry::new("a", "1", "p")])
                .with_address_slots([("SCS_1".to_string(), "a".to_string())].into_iter().collect()),
        );

        apply(&mut node, &AccountUpdate::new().with_accounts(accounts(&[("a", "1")])));

        assert_eq!(node.by_order.len(), 1);
        assert_eq!(node.product_address_slots["SCS_1"], "a");
        assert_eq!(node.by_address.len(), 1);
    }

    #[test]
    fn empty_views_clear() {
        let mut node = Node::default();
        apply(
            &mut node,
            &AccountUpdate::new()
                .with_list(vec![OrderedEntry::new("a", "1", "p")])
                .with_slots(
                    [("SCS_1".to_string(), OrderedEntry::new("a", "1", "p"))]
                        .into_iter()
                        .collect(),
                ),
        );
        apply(
            &mut node,
            &AccountUpdate::new().with_list(vec![]).with_slots(OrderedMap::new()),
        );
        assert!(node.by_order.is_empty());
        assert!(node.by_slot.is_empty());
    }

    #[test]
    fn write_never_touches_step_history() {
        let mut node = Node::default();
        node.by_step.push(Default::default());
        apply(&mut node, &AccountUpdate::new().with_list(vec![]).with_accounts(OrderedMap::new()));
        assert_eq!(node.by_step.len(), 1);
    }
}
