//! Integration tests for the Salesforce REST client.
//!
//! A wiremock server stands in for the org, so these tests check the exact
//! requests the client sends and how it maps responses and failures.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flexipatch::org::{QueryClient, QueryError, SalesforceClient};

const TOKEN: &str = "00Dxx0000001gPL!AQ8AQ.session";

fn client(server: &MockServer) -> SalesforceClient {
    SalesforceClient::new(server.uri(), "60.0", TOKEN)
}

mod query {
    use super::*;

    #[tokio::test]
    async fn sends_soql_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v60.0/query"))
            .and(query_param("q", "SELECT Id FROM Report WHERE DeveloperName = 'Pipeline'"))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 1,
                "done": true,
                "records": [
                    {
                        "attributes": { "type": "Report", "url": "/services/data/v60.0/sobjects/Report/00Oxx0000001234AAA" },
                        "Id": "00Oxx0000001234AAA"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server)
            .query("SELECT Id FROM Report WHERE DeveloperName = 'Pipeline'", false)
            .await
            .unwrap();

        assert_eq!(result.total_size, 1);
        assert!(result.done);
        assert_eq!(result.records[0]["Id"], "00Oxx0000001234AAA");
    }

    #[tokio::test]
    async fn tooling_queries_use_tooling_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v60.0/tooling/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 0,
                "done": true,
                "records": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server)
            .query("SELECT Id FROM FlexiPage WHERE DeveloperName = 'Account'", true)
            .await
            .unwrap();

        assert_eq!(result.total_size, 0);
        assert!(result.records.is_empty());
    }

    #[tokio::test]
    async fn version_prefix_and_trailing_slash_are_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v59.0/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 0,
                "records": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SalesforceClient::new(format!("{}/", server.uri()), "v59.0", TOKEN);
        let result = client.query("SELECT Id FROM Account", false).await.unwrap();

        assert_eq!(result.total_size, 0);
        assert!(result.done);
    }

    #[tokio::test]
    async fn empty_token_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = SalesforceClient::new(server.uri(), "60.0", "");
        let err = client.query("SELECT Id FROM Account", false).await.unwrap_err();

        assert_eq!(err, QueryError::AuthRequired);
    }
}

mod errors {
    use super::*;

    async fn query_with_status(status: u16, body: serde_json::Value) -> QueryError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v60.0/query"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;

        client(&server)
            .query("SELECT Id FROM Account", false)
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn unauthorized_is_auth_failed() {
        let err = query_with_status(
            401,
            json!([{ "message": "Session expired or invalid", "errorCode": "INVALID_SESSION_ID" }]),
        )
        .await;

        match err {
            QueryError::AuthFailed(message) => {
                assert!(message.contains("INVALID_SESSION_ID"));
                assert!(!message.contains(TOKEN));
            }
            other => panic!("expected AuthFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn forbidden_is_auth_failed() {
        let err = query_with_status(403, json!([{ "message": "no access" }])).await;
        assert!(matches!(err, QueryError::AuthFailed(ref m) if m.contains("Permission denied")));
    }

    #[tokio::test]
    async fn malformed_query_is_api_error_with_code() {
        let err = query_with_status(
            400,
            json!([{ "message": "unexpected token: FORM", "errorCode": "MALFORMED_QUERY" }]),
        )
        .await;

        assert_eq!(
            err,
            QueryError::ApiError {
                status: 400,
                message: "MALFORMED_QUERY: unexpected token: FORM".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn not_found_and_rate_limit() {
        let err = query_with_status(404, json!([{ "message": "The requested resource does not exist", "errorCode": "NOT_FOUND" }])).await;
        assert!(matches!(err, QueryError::NotFound(_)));

        let err = query_with_status(429, json!([])).await;
        assert_eq!(err, QueryError::RateLimited);
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let err = query_with_status(503, json!({ "unexpected": "shape" })).await;
        match err {
            QueryError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert!(message.contains("Unknown error"));
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_success_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .query("SELECT Id FROM Account", false)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let client = SalesforceClient::new("http://127.0.0.1:9", "60.0", TOKEN);
        let err = client.query("SELECT Id FROM Account", false).await.unwrap_err();
        assert!(matches!(err, QueryError::NetworkError(_)));
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn userinfo_maps_to_session_context() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/oauth2/userinfo"))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sub": "https://login.salesforce.com/id/00Dxx0000001gPLEAY/005xx000001Sv6AAAS",
                "organization_id": "00Dxx0000001gPLEAY",
                "preferred_username": "admin@acme.com",
                "email": "admin@acme.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = client(&server).session().await.unwrap();

        assert_eq!(session.org_id, "00Dxx0000001gPLEAY");
        assert_eq!(session.username, "admin@acme.com");
        assert_eq!(session.instance_url, server.uri());
    }

    #[tokio::test]
    async fn userinfo_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/oauth2/userinfo"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad_OAuth_Token"))
            .mount(&server)
            .await;

        let err = client(&server).session().await.unwrap_err();
        assert!(matches!(err, QueryError::AuthFailed(_)));
    }
}
