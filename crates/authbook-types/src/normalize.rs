//! Key normalization applied before any view is stored.
//!
//! Addresses and slot keys are trimmed. Keyed entries whose key is empty
//! after trimming are dropped. Positional entries are kept even with a blank
//! address so the list stays aligned with the run it describes. Email and
//! password values are never altered.

use crate::credential::{Credential, OrderedEntry, SlotEntry};
use crate::OrderedMap;

/// Trim surrounding whitespace from an address or slot key.
pub fn normalize_address(raw: &str) -> &str {
    raw.trim()
}

/// Normalize a by-address view. Later duplicates of a trimmed key win.
pub fn by_address(accounts: &OrderedMap<Credential>) -> OrderedMap<Credential> {
    let mut out = OrderedMap::with_capacity(accounts.len());
    for (address, credential) in accounts {
        let key = normalize_address(address);
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), credential.clone());
    }
    out
}

/// Normalize a positional view: addresses trimmed, length preserved.
pub fn by_order(entries: &[OrderedEntry]) -> Vec<OrderedEntry> {
    entries
        .iter()
        .map(|entry| OrderedEntry {
            address: normalize_address(&entry.address).to_string(),
            email: entry.email.clone(),
            password: entry.password.clone(),
        })
        .collect()
}

/// Normalize a slot view: slot keys and the addresses they carry are trimmed.
pub fn by_slot(slots: &OrderedMap<SlotEntry>) -> OrderedMap<SlotEntry> {
    let mut out = OrderedMap::with_capacity(slots.len());
    for (slot, entry) in slots {
        let key = normalize_address(slot);
        if key.is_empty() {
            continue;
        }
        out.insert(
            key.to_string(),
            SlotEntry {
                address: normalize_address(&entry.address).to_string(),
                email: entry.email.clone(),
                password: entry.password.clone(),
            },
        );
    }
    out
}

/// Normalize a slot → product address mapping.
pub fn address_slots(slots: &OrderedMap<String>) -> OrderedMap<String> {
    let mut out = OrderedMap::with_capacity(slots.len());
    for (slot, address) in slots {
        let key = normalize_address(slot);
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), normalize_address(address).to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cred(email: &str) -> Credential {
        Credential::new(email, "pw")
    }

    #[test]
    fn by_address_trims_and_drops_blank_keys() {
        let mut raw = OrderedMap::new();
        raw.insert("  https://a.test ".to_string(), cred("a@x.io"));
        raw.insert("   ".to_string(), cred("blank@x.io"));
        raw.insert(String::new(), cred("empty@x.io"));

        let out = by_address(&raw);
        assert_eq!(out.len(), 1);
        assert_eq!(out["https://a.test"], cred("a@x.io"));
    }

    #[test]
    fn by_address_later_duplicate_wins() {
        let mut raw = OrderedMap::new();
        raw.insert("addr".to_string(), cred("first@x.io"));
        raw.insert(" addr ".to_string(), cred("second@x.io"));

        let out = by_address(&raw);
        assert_eq!(out.len(), 1);
        assert_eq!(out["addr"].email, "second@x.io");
    }

    #[test]
    fn by_order_keeps_blank_addresses() {
        let entries = vec![
            OrderedEntry::new(" a ", "1@x.io", "pw"),
            OrderedEntry::new("", "", ""),
            OrderedEntry::new("a", "2@x.io", "pw"),
        ];
        let out = by_order(&entries);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].address, "a");
        assert_eq!(out[1].address, "");
        assert_eq!(out[2].email, "2@x.io");
    }

    #[test]
    fn by_slot_trims_key_and_address() {
        let mut raw = OrderedMap::new();
        raw.insert(" SCS_1 ".to_string(), OrderedEntry::new(" a ", "e", "p"));
        raw.insert("".to_string(), OrderedEntry::new("b", "e", "p"));

        let out = by_slot(&raw);
        assert_eq!(out.len(), 1);
        assert_eq!(out["SCS_1"].address, "a");
    }

    #[test]
    fn address_slots_trim_both_sides() {
        let mut raw = OrderedMap::new();
        raw.insert("SCS_1 ".to_string(), "  https://a.test\n".to_string());
        raw.insert(" ".to_string(), "https://b.test".to_string());

        let out = address_slots(&raw);
        assert_eq!(out.len(), 1);
        assert_eq!(out["SCS_1"], "https://a.test");
    }

    proptest! {
        #[test]
        fn by_order_preserves_length(addresses in proptest::collection::vec(".{0,12}", 0..20)) {
            let entries: Vec<OrderedEntry> =
                addresses.iter().map(|a| OrderedEntry::placeholder(a.as_str())).collect();
            prop_assert_eq!(by_order(&entries).len(), entries.len());
        }

        #[test]
        fn by_address_is_idempotent(keys in proptest::collection::vec("[ a-z]{0,8}", 0..20)) {
            let raw: OrderedMap<Credential> =
                keys.into_iter().map(|k| (k, Credential::new("e", "p"))).collect();
            let once = by_address(&raw);
            prop_assert_eq!(by_address(&once), once.clone());
            prop_assert!(once.keys().all(|k| !k.is_empty() && k.trim() == k));
        }
    }
}
