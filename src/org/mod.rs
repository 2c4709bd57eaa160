//! org
//!
//! Access to a Salesforce org: SOQL queries and session identity.
//!
//! # Architecture
//!
//! The `QueryClient` trait is the seam the core resolver depends on. The
//! resolver never opens connections itself; commands build a client with
//! [`connect`] and pass it in together with the [`SessionContext`].
//!
//! # Modules
//!
//! - `traits`: `QueryClient` trait, `QueryResult`, `SessionContext`, `QueryError`
//! - [`salesforce`]: REST implementation
//! - [`mock`]: Mock implementation for deterministic testing
//!
//! # Example
//!
//! ```ignore
//! use flexipatch::org::{connect, QueryClient};
//!
//! let client = connect(&settings)?;
//! let session = client.session().await?;
//! let result = client.query("SELECT Id FROM Account LIMIT 1", false).await?;
//! ```

pub mod mock;
pub mod salesforce;
mod traits;

pub use salesforce::SalesforceClient;
pub use traits::*;

use std::time::Duration;

/// Settings needed to open an org connection.
#[derive(Clone, PartialEq, Eq)]
pub struct OrgSettings {
    /// Instance base URL.
    pub instance_url: String,
    /// REST API version.
    pub api_version: String,
    /// Access token.
    pub access_token: String,
    /// Request timeout.
    pub timeout: Duration,
}

// Custom Debug to avoid exposing access_token
impl std::fmt::Debug for OrgSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrgSettings")
            .field("instance_url", &self.instance_url)
            .field("api_version", &self.api_version)
            .field("has_access_token", &!self.access_token.is_empty())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Build a REST client from settings.
///
/// # Errors
///
/// Returns `QueryError::AuthRequired` if no access token is available.
pub fn connect(settings: &OrgSettings) -> Result<SalesforceClient, QueryError> {
    if settings.access_token.is_empty() {
        return Err(QueryError::AuthRequired);
    }

    Ok(SalesforceClient::with_timeout(
        settings.instance_url.clone(),
        settings.api_version.clone(),
        settings.access_token.clone(),
        settings.timeout,
    ))
}
