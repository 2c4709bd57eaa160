//! store::json_file
//!
//! JSON file storage.
//!
//! # Format
//!
//! Documents are written as pretty JSON with two-space indentation and a
//! trailing newline, so diffs of committed changes stay reviewable. Key
//! order is preserved from the loaded file.
//!
//! Writes are atomic: content goes to a temp file in the same directory,
//! is synced, then renamed over the target. A failed write removes the
//! temp file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use super::traits::{DocumentStore, StoreError};
use crate::core::document::Document;

/// JSON file document store.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    /// Create a new store.
    pub fn new() -> Self {
        Self
    }

    /// Render a document the way it is written to disk.
    pub fn render(path: &Path, document: &Document) -> Result<String, StoreError> {
        let mut content =
            serde_json::to_string_pretty(document).map_err(|e| StoreError::Serialize {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        content.push('\n');
        Ok(content)
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self, path: &Path) -> Result<Document, StoreError> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Document::from_json(&content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn save(&self, path: &Path, document: &Document) -> Result<(), StoreError> {
        let content = Self::render(path, document)?;

        let temp_path = path.with_extension("json.tmp");
        let written = write_then_rename(&temp_path, path, content.as_bytes());
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }

        written.map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Write `content` to `temp_path`, sync it, then rename it over `target`.
fn write_then_rename(temp_path: &Path, target: &Path, content: &[u8]) -> io::Result<()> {
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;

        file.write_all(content)?;
        file.sync_all()?;
    }

    fs::rename(temp_path, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"{
  "regions": [
    {
      "regionName": "header",
      "components": [
        {
          "id": "abc",
          "componentAttributes": {
            "title": "Old"
          }
        }
      ]
    }
  ],
  "masterLabel": "Account"
}
"#;

    #[test]
    fn load_and_save_round_trip_is_byte_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.json");
        fs::write(&path, PAGE).unwrap();

        let store = JsonFileStore::new();
        let doc = store.load(&path).unwrap();
        store.save(&path, &doc).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), PAGE);
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.json");
        fs::write(&path, PAGE).unwrap();

        let store = JsonFileStore::new();
        let doc = store.load(&path).unwrap();
        store.save(&path, &doc).unwrap();

        assert!(!dir.path().join("page.json.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.json");
        fs::create_dir(&path).unwrap();

        let doc = Document::from_json(PAGE).unwrap();
        let err = JsonFileStore::new().save(&path, &doc).unwrap_err();

        assert!(matches!(err, StoreError::Write { .. }));
        assert!(!dir.path().join("page.json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn sparse_document_is_saved_without_added_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.json");
        let input = r#"{"regions":[{"regionName":"empty"},{"regionName":"r","components":[{"id":"x","componentName":"c"}]}]}"#;
        fs::write(&path, input).unwrap();

        let store = JsonFileStore::new();
        let doc = store.load(&path).unwrap();
        store.save(&path, &doc).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let expected: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(saved, expected);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = JsonFileStore::new()
            .load(&dir.path().join("missing.json"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn load_without_regions_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.json");
        fs::write(&path, r#"{ "masterLabel": "x" }"#).unwrap();

        let err = JsonFileStore::new().load(&path).unwrap_err();
        match err {
            StoreError::Parse { message, .. } => assert!(message.contains("regions")),
            other => panic!("expected Parse, got {:?}", other),
        }
    }
}
