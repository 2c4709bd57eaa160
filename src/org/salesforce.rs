//! org::salesforce
//!
//! Salesforce REST implementation of [`QueryClient`].
//!
//! # Endpoints
//!
//! - `GET {instance}/services/data/v{api}/query?q=...` for data queries
//! - `GET {instance}/services/data/v{api}/tooling/query?q=...` for Tooling API queries
//! - `GET {instance}/services/oauth2/userinfo` for the session identity
//!
//! # Authentication
//!
//! Requests carry the access token as a bearer token. The token is never
//! included in `Debug` output or error messages.
//!
//! # Example
//!
//! ```ignore
//! use flexipatch::org::{QueryClient, SalesforceClient};
//!
//! let client = SalesforceClient::new("https://acme.my.salesforce.com", "60.0", token);
//! let result = client.query("SELECT Id FROM Account WHERE Name = 'Acme'", false).await?;
//! let session = client.session().await?;
//! println!("{} records in org {}", result.total_size, session.org_id);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{QueryClient, QueryError, QueryResult, SessionContext};

/// Default REST API version.
pub const DEFAULT_API_VERSION: &str = "60.0";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "flexipatch-cli";

/// Salesforce REST client.
pub struct SalesforceClient {
    /// HTTP client for making requests
    client: Client,
    /// Access token
    token: String,
    /// Instance base URL without trailing slash
    instance_url: String,
    /// REST API version, e.g. "60.0"
    api_version: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("api_version", &self.api_version)
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

impl SalesforceClient {
    /// Create a client with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `instance_url` - Instance base URL; a trailing slash is ignored
    /// * `api_version` - REST API version, with or without a leading `v`
    /// * `token` - OAuth access token or session id
    pub fn new(
        instance_url: impl Into<String>,
        api_version: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::with_timeout(instance_url, api_version, token, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(
        instance_url: impl Into<String>,
        api_version: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        let instance_url: String = instance_url.into();
        let api_version: String = api_version.into();

        Self {
            client,
            token: token.into(),
            instance_url: strip_trailing_slash(&instance_url).to_string(),
            api_version: api_version.trim_start_matches('v').to_string(),
        }
    }

    /// Instance base URL without trailing slash.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// REST API version without the leading `v`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Fetch the identity of the authenticated session.
    ///
    /// # Errors
    ///
    /// Same mapping as [`QueryClient::query`].
    pub async fn session(&self) -> Result<SessionContext, QueryError> {
        let url = format!("{}/services/oauth2/userinfo", self.instance_url);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| QueryError::NetworkError(e.to_string()))?;

        let info: UserInfo = self.handle_response(response).await?;

        Ok(SessionContext {
            org_id: info.organization_id,
            username: info.preferred_username,
            instance_url: self.instance_url.clone(),
        })
    }

    /// Build the query endpoint URL.
    fn query_url(&self, tooling: bool) -> String {
        let scope = if tooling { "tooling/query" } else { "query" };
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, scope
        )
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, QueryError> {
        if self.token.is_empty() {
            return Err(QueryError::AuthRequired);
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            QueryError::AuthFailed("access token is not a valid header value".into())
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, QueryError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                QueryError::InvalidResponse(format!("failed to parse response: {}", e))
            })
        } else {
            Err(Self::map_error_response(response, status).await)
        }
    }

    /// Turn a non-success response into a `QueryError`.
    async fn map_error_response(response: Response, status: StatusCode) -> QueryError {
        // Salesforce error bodies are an array of { message, errorCode }.
        let message = match response.json::<Vec<SalesforceErrorResponse>>().await {
            Ok(errors) if !errors.is_empty() => errors
                .iter()
                .map(|e| match &e.error_code {
                    Some(code) => format!("{}: {}", code, e.message),
                    None => e.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; "),
            _ => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => QueryError::AuthFailed(message),
            StatusCode::FORBIDDEN => {
                QueryError::AuthFailed(format!("Permission denied: {}", message))
            }
            StatusCode::NOT_FOUND => QueryError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => QueryError::RateLimited,
            _ if status.is_server_error() => QueryError::ApiError {
                status: status.as_u16(),
                message: format!("Salesforce server error: {}", message),
            },
            _ => QueryError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl QueryClient for SalesforceClient {
    fn name(&self) -> &'static str {
        "salesforce"
    }

    async fn query(&self, soql: &str, tooling: bool) -> Result<QueryResult, QueryError> {
        let response = self
            .client
            .get(self.query_url(tooling))
            .headers(self.headers()?)
            .query(&[("q", soql)])
            .send()
            .await
            .map_err(|e| QueryError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }
}

/// Strip trailing slashes from a URL.
pub fn strip_trailing_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}

// =============================================================================
// API response types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SalesforceErrorResponse {
    message: String,
    #[serde(rename = "errorCode")]
    error_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    organization_id: String,
    preferred_username: String,
}
