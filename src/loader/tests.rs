//! Tests for the service definition loader

use super::*;
use crate::error::Error;
use crate::http::Backoff;
use crate::types::{BackoffType, Method};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::time::Duration;
use test_case::test_case;

const MINIMAL: &str = r#"
name: widgets
base_url: https://api.example.com
collections:
  - name: widgets
    action: ListWidgets
    path: /widgets
"#;

#[test]
fn test_minimal_definition_defaults() {
    let def = load_service_from_str(MINIMAL).unwrap();

    assert_eq!(def.name, "widgets");
    assert_eq!(def.version, "0.1.0");
    assert_eq!(def.http.timeout_secs, 30);
    assert_eq!(def.http.max_retries, 3);
    assert!(def.headers.is_empty());

    let widgets = def.collection("widgets").unwrap();
    assert_eq!(widgets.method, Method::GET);
    assert!(widgets.params.is_empty());
    assert!(widgets.records_path.is_none());
    assert!(widgets.pagination.is_none());

    let config = def.client_config();
    assert_eq!(config.backoff, Backoff::default());
    let request = widgets.base_request();
    assert!(request.timeout.is_none());
    assert!(request.max_retries.is_none());
}

#[test]
fn test_full_definition() {
    let yaml = r#"
name: inventory
version: "2024-01-01"
base_url: https://inventory.example.com/v1
http:
  timeout_secs: 5
  max_retries: 1
  backoff: linear
  initial_backoff_ms: 250
  max_backoff_ms: 1000
  rate_limit_rps: 20
  user_agent: inventory-lister/1.0
headers:
  X-Api-Key: secret
collections:
  - name: items
    action: ListItems
    method: POST
    path: /items
    params:
      Region: eu-west-1
    headers:
      X-Tenant: acme
    timeout_secs: 60
    max_retries: 0
    records_path: data.items
    pagination:
      token_path: meta.next
      token_param: cursor
      page_size_param: limit
"#;
    let def = load_service_from_str(yaml).unwrap();
    let items = def.action("ListItems").unwrap();

    assert_eq!(items.name, "items");
    assert_eq!(items.method, Method::POST);
    assert_eq!(items.params.get("Region"), Some(&"eu-west-1".to_string()));

    let pagination = items.pagination.as_ref().unwrap();
    assert_eq!(pagination.token_path, "meta.next");
    assert_eq!(pagination.token_param, "cursor");
    assert_eq!(pagination.page_size_param.as_deref(), Some("limit"));

    let config = def.client_config();
    assert_eq!(
        config.base_url.as_deref(),
        Some("https://inventory.example.com/v1")
    );
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 1);
    assert_eq!(config.user_agent, "inventory-lister/1.0");
    assert_eq!(
        config.default_headers.get("X-Api-Key"),
        Some(&"secret".to_string())
    );
    assert_eq!(config.rate_limit.unwrap().requests_per_second, 20);
    assert_eq!(
        config.backoff,
        Backoff::new(
            BackoffType::Linear,
            Duration::from_millis(250),
            Duration::from_secs(1)
        )
    );

    let request = items.base_request();
    assert_eq!(request.query.get("Region"), Some(&"eu-west-1".to_string()));
    assert_eq!(request.headers.get("X-Tenant"), Some(&"acme".to_string()));
    assert_eq!(request.timeout, Some(Duration::from_secs(60)));
    assert_eq!(request.max_retries, Some(0));
}

#[test]
fn test_client_config_without_rate_limit() {
    let def = load_service_from_str(MINIMAL).unwrap();
    assert!(def.client_config().rate_limit.is_none());
}

#[test_case("name: ''\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: A, path: /}", "name cannot be empty" ; "empty name")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections: []", "at least one collection" ; "no collections")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: A, path: /}\n  - {name: a, action: B, path: /}", "Duplicate collection names" ; "duplicate names")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: A, path: /}\n  - {name: b, action: A, path: /}", "Duplicate collection actions" ; "duplicate actions")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: '', action: A, path: /}", "Collection name cannot be empty" ; "empty collection name")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: '', path: /}", "action cannot be empty" ; "empty action")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: A, path: ''}", "path cannot be empty" ; "empty path")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: A, path: /, pagination: {token_path: '', token_param: t}}", "token_path and token_param" ; "empty token path")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: A, path: /, pagination: {token_path: t, token_param: t, page_size_param: ''}}", "page_size_param cannot be empty" ; "empty page size param")]
#[test_case("name: s\nbase_url: https://a.example.com\ncollections:\n  - {name: a, action: A, path: /, method: DELETE}", "Failed to parse YAML" ; "unsupported method")]
fn test_validation_rejects(yaml: &str, message: &str) {
    let err = load_service_from_str(yaml).unwrap_err();
    assert!(
        err.to_string().contains(message),
        "expected '{message}' in '{err}'"
    );
}

#[test]
fn test_malformed_yaml_is_yaml_error() {
    let err = load_service_from_str("name: [unclosed").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
}

#[test]
fn test_validation_rejects_bad_base_url() {
    let yaml = "name: s\nbase_url: not a url\ncollections:\n  - {name: a, action: A, path: /}";
    let err = load_service_from_str(yaml).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[test]
fn test_load_builtin_by_name() {
    let def = load_service("ec2").unwrap();
    assert_eq!(def.name, "ec2");
    assert_eq!(def.collections.len(), 4);
    assert_eq!(
        def.collection("security_groups").unwrap().method,
        Method::POST
    );
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(MINIMAL.as_bytes()).unwrap();

    let def = load_service(file.path()).unwrap();
    assert_eq!(def.name, "widgets");
}

#[test]
fn test_load_missing_service_lists_builtins() {
    let err = load_service("nonexistent").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("not found"));
    assert!(message.contains("ec2"));
}
