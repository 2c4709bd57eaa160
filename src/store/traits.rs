//! store::traits
//!
//! Document storage trait definition.
//!
//! # Design
//!
//! Storage is synchronous: a document is loaded once at the start of an
//! invocation and saved at most once at the end. Implementations own the
//! on-disk format; callers only see [`Document`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::document::Document;

/// Errors from document storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document could not be read.
    #[error("failed to read document '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not a valid page layout.
    #[error("failed to parse document '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// The document could not be serialized.
    #[error("failed to serialize document '{path}': {message}")]
    Serialize { path: PathBuf, message: String },

    /// The document could not be written.
    #[error("failed to write document '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    /// Path the failing operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            StoreError::Read { path, .. }
            | StoreError::Parse { path, .. }
            | StoreError::Serialize { path, .. }
            | StoreError::Write { path, .. } => path,
        }
    }
}

/// Trait for document storage.
pub trait DocumentStore: Send + Sync {
    /// Load a document.
    ///
    /// # Errors
    ///
    /// - `Read` if the document cannot be read
    /// - `Parse` if it is not a page layout (including a missing `regions` key)
    fn load(&self, path: &Path) -> Result<Document, StoreError>;

    /// Persist a document, replacing any previous content.
    ///
    /// # Errors
    ///
    /// - `Serialize` if the document cannot be encoded
    /// - `Write` if the content cannot be written
    fn save(&self, path: &Path, document: &Document) -> Result<(), StoreError>;
}
