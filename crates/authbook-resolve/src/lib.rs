//! Read-side views over a whole AuthBook document.
//!
//! The aggregator folds every `(project, file)` node into address-keyed
//! views; the resolver answers "which credentials should this run use for
//! these addresses" from those views. Both work on an in-memory
//! [`Document`](authbook_types::Document) snapshot and never touch storage.

pub mod aggregate;
pub mod resolver;

pub use aggregate::{flatten_by_address, group_by_address_ordered};
pub use resolver::{lookup, resolve, Resolution};
