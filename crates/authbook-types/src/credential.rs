//! Credential shapes stored in every node view.

use serde::{Deserialize, Serialize};

/// A login credential for one product address.
///
/// Values are stored verbatim. A credential whose email and password are both
/// blank carries no data and is never treated as a resolved account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns `true` if neither field holds anything but whitespace.
    pub fn is_blank(&self) -> bool {
        self.email.trim().is_empty() && self.password.trim().is_empty()
    }

    /// Bind this credential to an address.
    pub fn at(&self, address: impl Into<String>) -> OrderedEntry {
        OrderedEntry {
            address: address.into(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// A credential together with the address it was assigned to.
///
/// Used by the positional `by_order` history, where the same address may
/// appear many times with different credentials.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderedEntry {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl OrderedEntry {
    pub fn new(
        address: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// An entry carrying only an address: no credential was found for it.
    pub fn placeholder(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// The `{email, password}` half of this entry.
    pub fn credential(&self) -> Credential {
        Credential::new(self.email.clone(), self.password.clone())
    }

    /// Returns `true` if this entry carries no credential data.
    pub fn is_blank(&self) -> bool {
        self.email.trim().is_empty() && self.password.trim().is_empty()
    }
}

/// Slot views (`SCS_1`, `SCS_2`, ...) store the same `{address, email,
/// password}` shape as the positional history.
pub type SlotEntry = OrderedEntry;
