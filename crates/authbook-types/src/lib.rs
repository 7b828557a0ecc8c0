//! Foundation types for AuthBook.
//!
//! AuthBook keeps reusable login credentials for automated test runs, keyed
//! by the address of the product environment they are valid for. This crate
//! defines the persisted document shape shared by every other AuthBook crate.
//!
//! # Key Types
//!
//! - [`Credential`]: an `{email, password}` pair
//! - [`OrderedEntry`] / [`SlotEntry`]: a credential bound to an address
//! - [`Node`]: the per-(project, file) container holding every credential view
//! - [`StepRecord`]: a frozen snapshot appended to a node's step history
//! - [`Document`]: project name → file name → [`Node`]
//! - [`AccountUpdate`]: the optional views a caller supplies to a write

pub mod credential;
pub mod document;
pub mod node;
pub mod normalize;
pub mod update;

pub use credential::{Credential, OrderedEntry, SlotEntry};
pub use document::Document;
pub use node::{Node, StepRecord};
pub use normalize::normalize_address;
pub use update::{AccountUpdate, StepHeader};

/// Insertion-ordered map used for every keyed view in the document.
pub type OrderedMap<V> = indexmap::IndexMap<String, V>;
