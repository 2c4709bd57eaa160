//! org::mock
//!
//! Mock query client for deterministic testing.
//!
//! # Design
//!
//! Results are registered per query text and endpoint. Queries with no
//! registered result return an empty result set, like a real org would for a
//! query that matches nothing. Every call is recorded for verification.
//!
//! # Example
//!
//! ```
//! use flexipatch::org::mock::MockOrg;
//! use flexipatch::org::QueryClient;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let org = MockOrg::new().with_records(
//!     "SELECT Id FROM Account WHERE Name = 'Acme'",
//!     false,
//!     vec![json!({ "Id": "001xx0000001234AAA" })],
//! );
//!
//! let result = org.query("SELECT Id FROM Account WHERE Name = 'Acme'", false).await.unwrap();
//! assert_eq!(result.total_size, 1);
//! assert_eq!(org.operations().len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{QueryClient, QueryError, QueryResult, SessionContext};

/// Mock org for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockOrg {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockOrgInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockOrgInner {
    /// Canned results keyed by (query, tooling).
    results: HashMap<(String, bool), QueryResult>,
    /// Session identity reported by this org.
    session: SessionContext,
    /// Error to return from every query, if set.
    fail_on: Option<QueryError>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Query { soql: String, tooling: bool },
}

impl MockOrg {
    /// Create a mock org with no registered results.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockOrgInner {
                results: HashMap::new(),
                session: SessionContext {
                    org_id: "00Dxx0000001gPLEAY".to_string(),
                    username: "admin@example.com".to_string(),
                    instance_url: "https://example.my.salesforce.com".to_string(),
                },
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Register a full result for a query.
    pub fn with_result(self, soql: &str, tooling: bool, result: QueryResult) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.results.insert((soql.to_string(), tooling), result);
        }
        self
    }

    /// Register records for a query. Non-object values are ignored.
    pub fn with_records(self, soql: &str, tooling: bool, records: Vec<Value>) -> Self {
        let records: Vec<Map<String, Value>> = records
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.with_result(soql, tooling, QueryResult::from_records(records))
    }

    /// Replace the session identity.
    pub fn with_session(self, session: SessionContext) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.session = session;
        }
        self
    }

    /// Make every query fail with the given error.
    pub fn fail_on(self, error: QueryError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(error);
        }
        self
    }

    /// Session identity reported by this org.
    pub fn session(&self) -> SessionContext {
        self.inner.lock().unwrap().session.clone()
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }
}

impl Default for MockOrg {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryClient for MockOrg {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn query(&self, soql: &str, tooling: bool) -> Result<QueryResult, QueryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Query {
            soql: soql.to_string(),
            tooling,
        });

        if let Some(err) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(inner
            .results
            .get(&(soql.to_string(), tooling))
            .cloned()
            .unwrap_or_default())
    }
}
