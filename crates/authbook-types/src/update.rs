//! Caller-supplied views for a write or a step append.

use serde::{Deserialize, Serialize};

use crate::credential::{Credential, OrderedEntry, SlotEntry};
use crate::OrderedMap;

/// The optional views supplied to a write.
///
/// `None` and `Some(empty)` differ: a `None` view leaves the stored value
/// untouched, while `Some` replaces it (or, for `accounts`, merges into it).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    /// Address → credential, merged into `by_address`.
    #[serde(default, alias = "by_address")]
    pub accounts: Option<OrderedMap<Credential>>,
    /// Positional history, replaces `by_order`.
    #[serde(default, alias = "by_order")]
    pub accounts_list: Option<Vec<OrderedEntry>>,
    /// Slot → credential, replaces `by_slot`.
    #[serde(default, alias = "by_slot")]
    pub accounts_slots: Option<OrderedMap<SlotEntry>>,
    /// Slot → product address, replaces `product_address_slots`.
    #[serde(default)]
    pub product_address_slots: Option<OrderedMap<String>>,
}

impl AccountUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(mut self, accounts: OrderedMap<Credential>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    pub fn with_list(mut self, list: Vec<OrderedEntry>) -> Self {
        self.accounts_list = Some(list);
        self
    }

    pub fn with_slots(mut self, slots: OrderedMap<SlotEntry>) -> Self {
        self.accounts_slots = Some(slots);
        self
    }

    pub fn with_address_slots(mut self, slots: OrderedMap<String>) -> Self {
        self.product_address_slots = Some(slots);
        self
    }

    /// Returns `true` if no view was supplied.
    pub fn is_noop(&self) -> bool {
        self.accounts.is_none()
            && self.accounts_list.is_none()
            && self.accounts_slots.is_none()
            && self.product_address_slots.is_none()
    }
}

/// Identifies one automation step in a step append.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepHeader {
    pub index: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub event: String,
}

impl StepHeader {
    pub fn new(index: i64, name: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            event: event.into(),
        }
    }

    /// The recorded step name: the given name, or `step_<index>` when empty.
    ///
    /// A whitespace-only name is kept as given.
    pub fn resolved_name(&self) -> String {
        if self.name.is_empty() {
            format!("step_{}", self.index)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_update_is_noop() {
        assert!(AccountUpdate::new().is_noop());
        assert!(!AccountUpdate::new().with_list(vec![]).is_noop());
    }

    #[test]
    fn step_name_falls_back_to_index() {
        assert_eq!(StepHeader::new(3, "", "").resolved_name(), "step_3");
        assert_eq!(StepHeader::new(3, "register", "").resolved_name(), "register");
    }

    #[test]
    fn whitespace_step_name_is_kept() {
        assert_eq!(StepHeader::new(2, "  ", "").resolved_name(), "  ");
    }

    #[test]
    fn json_accepts_node_field_names() {
        let update: AccountUpdate = serde_json::from_str(
            r#"{"by_address":{"a":{"email":"e","password":"p"}},"by_order":[]}"#,
        )
        .unwrap();
        assert_eq!(update.accounts.unwrap()["a"].email, "e");
        assert_eq!(update.accounts_list, Some(vec![]));
        assert!(update.accounts_slots.is_none());
    }

    #[test]
    fn json_missing_views_stay_none() {
        let update: AccountUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_noop());
    }
}
