//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .backoff(Backoff::new(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(5),
        ))
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

async fn get(
    client: &HttpClient,
    path: &str,
    config: RequestConfig,
) -> crate::error::Result<reqwest::Response> {
    client.request(reqwest::Method::GET, path, config).await
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.backoff.kind, BackoffType::Exponential);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("resource-pager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(Backoff::new(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        ))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff.kind, BackoffType::Linear);
    assert_eq!(config.backoff.initial, Duration::from_millis(200));
    assert_eq!(config.backoff.max, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("MaxResults", "10")
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"key": "value"}))
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(config.query.get("MaxResults"), Some(&"10".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[test]
fn test_exponential_backoff() {
    let backoff = Backoff::new(
        BackoffType::Exponential,
        Duration::from_millis(100),
        Duration::from_secs(1),
    );

    assert_eq!(backoff.delay(0), Duration::from_millis(100));
    assert_eq!(backoff.delay(1), Duration::from_millis(200));
    assert_eq!(backoff.delay(3), Duration::from_millis(800));
    assert_eq!(backoff.delay(10), Duration::from_secs(1));
    assert_eq!(backoff.delay(u32::MAX), Duration::from_secs(1));
}

#[test]
fn test_linear_and_constant_backoff() {
    let linear = Backoff::new(
        BackoffType::Linear,
        Duration::from_millis(100),
        Duration::from_secs(1),
    );
    assert_eq!(linear.delay(2), Duration::from_millis(300));
    assert_eq!(linear.delay(50), Duration::from_secs(1));

    let constant = Backoff::new(
        BackoffType::Constant,
        Duration::from_millis(100),
        Duration::from_secs(1),
    );
    assert_eq!(constant.delay(5), Duration::from_millis(100));
}

#[tokio::test]
async fn test_http_client_request_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("MaxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Volumes": [{"VolumeId": "vol-1"}]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let body: serde_json::Value = client
        .request_json(
            reqwest::Method::GET,
            "/volumes",
            RequestConfig::new().query("MaxResults", "5"),
        )
        .await
        .unwrap();

    assert_eq!(body["Volumes"][0]["VolumeId"], "vol-1");
}

#[tokio::test]
async fn test_http_client_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/groups"))
        .and(body_json(serde_json::json!({"NextToken": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let response = client
        .request(
            reqwest::Method::POST,
            "/groups",
            RequestConfig::new().json(serde_json::json!({"NextToken": "abc"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("X-Api-Key", "secret123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Api-Key", "secret123")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = get(&client, "/secure", RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let body: serde_json::Value = client
        .request_json(reqwest::Method::GET, "/flaky", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_http_client_gives_up_after_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = get(&client, "/down", RequestConfig::new().retries(1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, ref body } if body == "boom"));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_http_client_no_retry_on_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = get(&client, "/missing", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_http_client_honors_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let response = get(&client, "/throttled", RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_rate_limited_error_when_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = get(&client, "/throttled", RequestConfig::new().retries(0))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 0
        }
    ));
}

#[tokio::test]
async fn test_request_headers_merge_with_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tenant"))
        .and(header("X-Api-Key", "secret123"))
        .and(header("X-Tenant", "acme"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Api-Key", "secret123")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = get(&client, "/tenant", RequestConfig::new().header("X-Tenant", "acme"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_request_timeout_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = get(
        &client,
        "/slow",
        RequestConfig::new()
            .timeout(Duration::from_millis(50))
            .retries(0),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}
