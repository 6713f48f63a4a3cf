//! Integration tests for request dispatch and response classification.
//!
//! These tests run against a wiremock server and verify the wire contract:
//! signed headers, nonce injection, JSON bodies, and the mapping of HTTP
//! statuses onto `ApiResponse` / `ApiError`.

use ometria_api::{ApiError, ApiKey, ApiSecret, Client, OmetriaConfig, Params};
use serde_json::json;
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Creates a client pointed at the given mock server.
fn create_test_client(base_url: &str) -> Client {
    let config = OmetriaConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_secret(ApiSecret::new("test-secret").unwrap())
        .base_url(base_url)
        .build()
        .unwrap();
    Client::new(config)
}

/// Matches requests that carry a `nonce` query parameter.
struct HasNonce;

impl Match for HasNonce {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().any(|(key, _)| key == "nonce")
    }
}

#[tokio::test]
async fn test_get_sends_signed_headers_and_nonce() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("Auth-API-Key", "test-key"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header_exists("Auth-Signature"))
        .and(HasNonce)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client.resource("products").get(None, None).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.status, 200);
    assert_eq!(response.data, json!({}));
}

#[tokio::test]
async fn test_get_sends_empty_object_body_by_default() {
    let mock_server = MockServer::start().await;

    // The original wire contract always sends a body, even on GET,
    // because the signature covers it.
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(body_string("{}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    client.resource("products").get(None, None).await.unwrap();
}

#[tokio::test]
async fn test_caller_params_are_sent_alongside_the_nonce() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .and(HasNonce)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let mut params = Params::new();
    params.insert("limit".to_string(), "10".to_string());
    params.insert("offset".to_string(), "20".to_string());

    client
        .resource("products")
        .get(Some(params), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_put_sends_serialized_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/products/1234"))
        .and(body_string(r#"{"title":"T-shirt"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1234})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client
        .resource("products")
        .id(1234)
        .put(None, Some(json!({"title": "T-shirt"})))
        .await
        .unwrap();

    assert_eq!(response.data, json!({"id": 1234}));
}

#[tokio::test]
async fn test_post_accepts_list_payload_for_bulk_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products/_bulk"))
        .and(body_string(r#"[{"id":"a"},{"id":"b"}]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    client
        .resource("products")
        .child("_bulk")
        .post(None, Some(json!([{"id": "a"}, {"id": "b"}])))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_404_with_json_body_maps_to_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/unknown"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let error = client
        .resource("products")
        .id("unknown")
        .get(None, None)
        .await
        .unwrap_err();

    match error {
        ApiError::Client { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, json!({"error": "not found"}));
        }
        other => panic!("expected ApiError::Client, got {other:?}"),
    }
}

#[tokio::test]
async fn test_503_with_raw_body_maps_to_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let error = client.resource("products").get(None, None).await.unwrap_err();

    match error {
        ApiError::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected ApiError::Server, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_error_with_non_json_body_propagates_parse_failure() {
    let mock_server = MockServer::start().await;

    // Client errors are assumed to carry JSON; this one does not, so the
    // parse failure surfaces instead of an ApiError::Client.
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let error = client.resource("products").get(None, None).await.unwrap_err();

    assert!(matches!(error, ApiError::InvalidJson(_)));
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_empty_success_body_parses_as_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client.resource("products").get(None, None).await.unwrap();

    assert_eq!(response.data, json!({}));
}

#[tokio::test]
async fn test_malformed_json_on_success_propagates_parse_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let error = client.resource("products").get(None, None).await.unwrap_err();

    assert!(matches!(error, ApiError::InvalidJson(_)));
}

#[tokio::test]
async fn test_connection_failure_maps_to_network_error() {
    // Nothing listens on port 1.
    let client = create_test_client("http://127.0.0.1:1/");
    let error = client.resource("products").get(None, None).await.unwrap_err();

    assert!(matches!(error, ApiError::Network(_)));
    assert_eq!(error.status(), None);
}
