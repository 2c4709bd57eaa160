//! store
//!
//! Document storage abstraction.
//!
//! # Architecture
//!
//! Documents are loaded and saved through the `DocumentStore` trait:
//!
//! - [`JsonFileStore`]: JSON files on disk (default)
//! - [`MemoryStore`]: in-memory, for tests
//!
//! # Example
//!
//! ```no_run
//! use flexipatch::store::{DocumentStore, JsonFileStore};
//! use std::path::Path;
//!
//! let store = JsonFileStore::new();
//! let document = store.load(Path::new("force-app/main/default/flexipages/Account.json")).unwrap();
//! println!("{} regions", document.regions.len());
//! ```

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{DocumentStore, StoreError};
