//! store::memory
//!
//! In-memory document store for tests.
//!
//! Documents are kept by path. Every save is recorded so tests can assert
//! that failed invocations never wrote anything.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::{DocumentStore, StoreError};
use crate::core::document::Document;

/// In-memory document store.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    documents: HashMap<PathBuf, Document>,
    saves: Vec<PathBuf>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one document.
    pub fn with_document(path: impl Into<PathBuf>, document: Document) -> Self {
        let store = Self::new();
        store
            .inner
            .lock()
            .unwrap()
            .documents
            .insert(path.into(), document);
        store
    }

    /// Current content stored at a path.
    pub fn get(&self, path: &Path) -> Option<Document> {
        self.inner.lock().unwrap().documents.get(path).cloned()
    }

    /// Paths saved so far, in order.
    pub fn saves(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().saves.clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Document, StoreError> {
        self.get(path).ok_or_else(|| StoreError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"),
        })
    }

    fn save(&self, path: &Path, document: &Document) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .documents
            .insert(path.to_path_buf(), document.clone());
        inner.saves.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::from_json(r#"{"regions":[]}"#).unwrap()
    }

    #[test]
    fn load_missing_is_read_error() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.load(Path::new("x.json")),
            Err(StoreError::Read { .. })
        ));
    }

    #[test]
    fn save_records_and_replaces() {
        let store = MemoryStore::with_document("page.json", doc());
        assert!(store.saves().is_empty());

        let mut updated = doc();
        updated
            .extra
            .insert("masterLabel".into(), serde_json::Value::from("New"));
        store.save(Path::new("page.json"), &updated).unwrap();

        assert_eq!(store.saves(), vec![PathBuf::from("page.json")]);
        assert_eq!(store.get(Path::new("page.json")).unwrap(), updated);
    }
}
