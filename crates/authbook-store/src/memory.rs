use std::sync::RwLock;

use authbook_types::Document;

use crate::error::StoreResult;
use crate::traits::DocumentStore;

/// In-memory document store.
///
/// Intended for tests and embedding. The document is held behind a `RwLock`
/// and cloned on load and save; `update` holds the write lock for the whole
/// load-modify-save cycle.
pub struct InMemoryDocumentStore {
    document: RwLock<Document>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create a store seeded with a document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self) -> StoreResult<Document> {
        Ok(self.document.read().expect("lock poisoned").clone())
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        *self.document.write().expect("lock poisoned") = document.clone();
        Ok(())
    }

    fn update(&self, mutate: &mut dyn FnMut(&mut Document)) -> StoreResult<()> {
        let mut guard = self.document.write().expect("lock poisoned");
        mutate(&mut *guard);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projects = self
            .document
            .read()
            .map(|doc| doc.projects().count())
            .unwrap_or_default();
        f.debug_struct("InMemoryDocumentStore")
            .field("project_count", &projects)
            .finish()
    }
}
