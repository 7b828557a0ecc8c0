//! Persistent credential document storage for AuthBook.
//!
//! The whole document (project → file → node) lives in a single YAML file.
//! Every mutating operation is a full load → in-memory transform → full save
//! cycle; nothing is cached between calls.
//!
//! # Write Semantics
//!
//! Each node view has its own write path:
//!
//! - `by_address` **merges**: new addresses are added, existing addresses are
//!   overwritten, unmentioned addresses are kept.
//! - `by_order`, `by_slot` and `product_address_slots` are **replaced**
//!   wholesale, and only when the caller supplies them.
//! - `by_step` is **appended** to and never rewritten.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`YamlFileStore`]: the backing file, replaced atomically on save and
//!   guarded by an exclusive sidecar lock during writes
//! - [`InMemoryDocumentStore`]: for tests and embedding
//!
//! # Reading Rules
//!
//! 1. A missing backing file is an empty document.
//! 2. Structurally wrong sub-nodes read as empty; they never raise.
//! 3. I/O and serialization failures on save are always propagated.

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;
pub mod step;
pub mod traits;
pub mod writer;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::YamlFileStore;
pub use memory::InMemoryDocumentStore;
pub use step::StepRecorder;
pub use traits::DocumentStore;
