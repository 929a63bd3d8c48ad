//! Loader types
//!
//! Declarative service definition types for YAML parsing.

use crate::http::{Backoff, HttpClientConfig, RateLimiterConfig, RequestConfig};
use crate::types::{BackoffType, Method, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ============================================================================
// Service Definition
// ============================================================================

/// Top-level service definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceDefinition {
    /// Service name (e.g. "ec2")
    pub name: String,
    /// API version
    #[serde(default = "default_version")]
    pub version: String,
    /// Base URL for all requests
    pub base_url: String,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpDefinition,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Listable collections
    pub collections: Vec<CollectionDefinition>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

impl ServiceDefinition {
    /// Find a collection by name
    pub fn collection(&self, name: &str) -> Option<&CollectionDefinition> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Find a collection by the listing action it maps to
    pub fn action(&self, action: &str) -> Option<&CollectionDefinition> {
        self.collections.iter().find(|c| c.action == action)
    }

    /// HTTP client configuration for this service
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .backoff(Backoff::new(
                self.http.backoff,
                Duration::from_millis(self.http.initial_backoff_ms),
                Duration::from_millis(self.http.max_backoff_ms),
            ));

        builder = match self.http.rate_limit_rps {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = self.http.user_agent.clone().none_if_empty() {
            builder = builder.user_agent(agent);
        }

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpDefinition {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retries
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Growth of the delay between retries
    #[serde(default)]
    pub backoff: BackoffType,
    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    /// Cap on a single retry delay, in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
    /// Rate limit (requests per second)
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            rate_limit_rps: None,
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    60_000
}

// ============================================================================
// Collection Definition
// ============================================================================

/// One listable collection and the action behind it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CollectionDefinition {
    /// Collection name (e.g. "key_pairs")
    pub name: String,
    /// Listing action (e.g. "DescribeKeyPairs")
    pub action: String,
    /// HTTP method
    #[serde(default)]
    pub method: Method,
    /// URL path relative to the base URL
    pub path: String,
    /// Static query parameters sent with every page
    #[serde(default)]
    pub params: HashMap<String, String>,
    /// Extra headers for this collection's requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Overrides the service timeout, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Overrides the service retry budget
    #[serde(default)]
    pub max_retries: Option<u32>,
    /// Path to the records in the response body
    #[serde(default)]
    pub records_path: Option<String>,
    /// Continuation token handling; absent means single-page listings
    #[serde(default)]
    pub pagination: Option<PaginationDefinition>,
}

impl CollectionDefinition {
    /// Request carrying this collection's static parts and overrides
    pub fn base_request(&self) -> RequestConfig {
        let mut req = RequestConfig::new();
        for (key, value) in &self.params {
            req = req.query(key, value);
        }
        for (key, value) in &self.headers {
            req = req.header(key, value);
        }
        if let Some(secs) = self.timeout_secs {
            req = req.timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.max_retries {
            req = req.retries(retries);
        }
        req
    }
}

/// Where the continuation token lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginationDefinition {
    /// Path to the next token in the response body
    pub token_path: String,
    /// Request parameter the token is sent back in
    pub token_param: String,
    /// Request parameter carrying the page size
    #[serde(default)]
    pub page_size_param: Option<String>,
}
