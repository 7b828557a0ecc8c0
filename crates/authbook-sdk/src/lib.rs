//! High-level SDK for AuthBook.
//!
//! Provides one facade, [`AuthBook`], over the document store, the
//! credential generator and the resolver. This is the main entry point for
//! test harnesses embedding AuthBook.

pub mod book;
pub mod config;
pub mod error;

pub use book::AuthBook;
pub use config::BookConfig;
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use authbook_gen::GeneratorConfig;
pub use authbook_resolve::Resolution;
pub use authbook_store::{DocumentStore, InMemoryDocumentStore, StoreError, YamlFileStore};
pub use authbook_types::{
    AccountUpdate, Credential, Document, Node, OrderedEntry, OrderedMap, SlotEntry, StepHeader,
    StepRecord,
};
