//! core::errors
//!
//! Error taxonomy for a patch invocation.
//!
//! Every variant is fatal to the invocation. There is no retry and no
//! partial success; when any of these is returned before the save step,
//! nothing has been written.

use thiserror::Error;

use crate::org::QueryError;
use crate::store::StoreError;

/// Errors from locating, resolving, and patching.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Zero or several value sources, or an invalid flag combination.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No component carries the requested id.
    #[error("component '{id}' not found in any region")]
    NotFound { id: String },

    /// The query matched nothing.
    #[error("query returned no records: {query}")]
    NoRecords { query: String },

    /// The query matched more than one record.
    #[error("query returned {count} records, expected exactly one (fix your query): {query}")]
    AmbiguousQuery { query: String, count: u64 },

    /// The single record has no usable value for the requested field.
    #[error("field '{field}' is missing or null on the query result")]
    MissingField { field: String },

    /// The property holding a sub-property is not an encoded JSON object.
    #[error("property '{property}' does not hold embedded JSON: {reason}")]
    MalformedEmbeddedJson { property: String, reason: String },

    /// Loading or saving the document failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The org query itself failed.
    #[error("query failed: {0}")]
    Query(#[from] QueryError),
}
