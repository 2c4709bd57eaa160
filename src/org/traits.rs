//! org::traits
//!
//! Query client trait and the types exchanged with an org.
//!
//! # Design
//!
//! The `QueryClient` trait is async because queries involve network I/O.
//! The core resolver only sees this trait, so tests can run against
//! [`MockOrg`](super::mock::MockOrg) without a live connection.
//!
//! # Example
//!
//! ```ignore
//! use flexipatch::org::{QueryClient, QueryError};
//!
//! async fn count_accounts(client: &dyn QueryClient) -> Result<u64, QueryError> {
//!     let result = client.query("SELECT Id FROM Account", false).await?;
//!     Ok(result.total_size)
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from org operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// No access token is available.
    #[error("authentication required")]
    AuthRequired,

    /// The token was rejected (expired, revoked, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The endpoint or object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// The API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result of a SOQL query.
///
/// `total_size` is the number of matching records on the server, which may
/// exceed `records.len()` when the result is paginated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Number of matching records.
    pub total_size: u64,
    /// Whether all records were returned in this batch.
    #[serde(default = "default_done")]
    pub done: bool,
    /// Returned records.
    #[serde(default)]
    pub records: Vec<Map<String, Value>>,
}

fn default_done() -> bool {
    true
}

impl QueryResult {
    /// Build a complete result from a list of records.
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        Self {
            total_size: records.len() as u64,
            done: true,
            records,
        }
    }
}

/// Identity of the active org connection.
///
/// Passed explicitly to the resolver for `Variable` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Organization id (18-character form as returned by the API).
    pub org_id: String,
    /// Username of the authenticated user.
    pub username: String,
    /// Instance base URL, e.g. `https://acme.my.salesforce.com`.
    pub instance_url: String,
}

/// Runs queries against an org.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Errors
///
/// All methods return `Result<T, QueryError>`. Callers should handle:
/// - `AuthRequired` / `AuthFailed`: run `flexipatch auth`
/// - `ApiError`: usually a malformed SOQL statement
/// - `NetworkError`: check connectivity and the instance URL
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Client name (e.g., "salesforce", "mock").
    fn name(&self) -> &'static str;

    /// Execute a SOQL query.
    ///
    /// # Arguments
    ///
    /// * `soql` - The query text
    /// * `tooling` - Use the Tooling API endpoint instead of the data endpoint
    async fn query(&self, soql: &str, tooling: bool) -> Result<QueryResult, QueryError>;
}
