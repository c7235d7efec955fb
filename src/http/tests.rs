//! Tests for the HTTP client module

use super::*;
use crate::auth::{AuthConfig, Authenticator};
use crate::types::BackoffType;
use crate::Error;
use futures::StreamExt;
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

fn fast_retry_client(server: &MockServer, retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(50),
        )
        .build();
    HttpClient::with_config(config).unwrap()
}

fn get(path: &str) -> RequestBuilder {
    RequestBuilder::new(Method::GET, path, &[]).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(150));
    assert_eq!(config.max_retries, 0);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.enable_gzip);
    assert!(config.user_agent.starts_with("cloudant-sdk/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://example.cloudant.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .gzip(false)
        .build();

    assert_eq!(
        config.base_url,
        Some("https://example.cloudant.com".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(!config.enable_gzip);
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(500));
    assert_eq!(client.calculate_backoff(40), Duration::from_millis(500));
}

#[test]
fn test_calculate_linear_backoff_saturates() {
    let config = HttpClientConfig::builder()
        .backoff(BackoffType::Linear, Duration::from_millis(100), Duration::from_millis(250))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(u32::MAX), Duration::from_millis(250));

    let config = HttpClientConfig::builder()
        .backoff(BackoffType::Linear, Duration::from_secs(u64::MAX), Duration::MAX)
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert_eq!(client.calculate_backoff(3), Duration::MAX);
}

#[tokio::test]
async fn test_execute_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_up"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let data: serde_json::Value = client.execute_json(&get("/_up")).await.unwrap();

    assert_eq!(data["status"], "ok");
}

#[tokio::test]
async fn test_execute_json_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_up"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .execute_json::<serde_json::Value>(&get("/_up"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_query_params_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_all_dbs"))
        .and(query_param("limit", "2"))
        .and(query_param("descending", "true"))
        .and(header("X-Request-Id", "req-456"))
        .and(header("X-Default", "on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["a", "b"])))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Default", "on")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let request = get("/_all_dbs")
        .query_opt("limit", Some(2))
        .query_opt("descending", Some(true))
        .header("X-Request-Id", "req-456");
    let dbs: Vec<String> = client.execute_json(&request).await.unwrap();

    assert_eq!(dbs, vec!["a", "b"]);
}

#[tokio::test]
async fn test_request_header_overrides_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("Accept", "application/json")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .execute(&get("/").header("Accept", "text/plain"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_json_body_sets_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_dbs_info"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"keys": ["products"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RequestBuilder::new(Method::POST, "/_dbs_info", &[])
        .unwrap()
        .json(&serde_json::json!({"keys": ["products"]}))
        .unwrap();
    let response = client.execute(&request).await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_service_error_not_retried_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": "service_unavailable",
            "reason": "try later"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.execute(&get("/flaky")).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    match err {
        Error::Service { error, reason, .. } => {
            assert_eq!(error.as_deref(), Some("service_unavailable"));
            assert_eq!(reason.as_deref(), Some("try later"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_on_503_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server, 3);
    let body: serde_json::Value = client.execute_json(&get("/flaky")).await.unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_retry_honors_retry_after_on_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server, 2);
    let body: serde_json::Value = client.execute_json(&get("/busy")).await.unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_501_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nope"))
        .respond_with(ResponseTemplate::new(501))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server, 3);
    let err = client.execute(&get("/nope")).await.unwrap_err();

    assert_eq!(err.status(), Some(501));
}

#[tokio::test]
async fn test_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server, 2);
    let err = client.execute(&get("/down")).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "not_found",
            "reason": "missing"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_retry_client(&mock_server, 3);
    let err = client.execute(&get("/missing")).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_authenticator_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_session"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().base_url(mock_server.uri()).build();
    let auth = Arc::new(Authenticator::new(AuthConfig::basic("user", "pass")));
    let client = HttpClient::with_auth(config, auth).unwrap();

    let response = client.execute(&get("/_session")).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_execute_head() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/db/doc"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"1-abc\""))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RequestBuilder::new(Method::HEAD, "/{db}/{doc_id}", &[("db", "db"), ("doc_id", "doc")])
        .unwrap();
    let head = client.execute_head(&request).await.unwrap();

    assert_eq!(head.status, 200);
    assert_eq!(head.etag().as_deref(), Some("1-abc"));
}

#[tokio::test]
async fn test_execute_bytes_and_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/db/doc/att.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .set_body_bytes(b"hello world".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = get("/db/doc/att.txt");

    let binary = client.execute_bytes(&request).await.unwrap();
    assert_eq!(binary.content_type(), Some("text/plain"));
    assert_eq!(&binary.body[..], b"hello world");

    let mut stream = client.execute_stream(&request).await.unwrap();
    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(collected, b"hello world");
}

#[tokio::test]
async fn test_rate_limited_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_up"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());

    for _ in 0..3 {
        client.execute(&get("/_up")).await.unwrap();
    }
}

#[test]
fn test_enable_disable_retries() {
    let mut client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    client.enable_retries(4, Duration::from_secs(10));
    assert_eq!(client.config().max_retries, 4);
    assert_eq!(client.config().max_backoff, Duration::from_secs(10));

    client.disable_retries();
    assert_eq!(client.config().max_retries, 0);
}
