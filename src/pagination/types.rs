//! Pagination types
//!
//! Raw listing results, continuation tokens, action parameters and the
//! result-capture side channel shared by cursors, pages and sequences.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One untyped record from a listing page
pub type RawRecord = Value;

// ============================================================================
// Continuation Token
// ============================================================================

/// Opaque value redeemable for the next page of a listing.
///
/// Pagination only tests tokens for presence and hands them back to the
/// listing operation verbatim. Interpreting them is the transport's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(Value);

impl ContinuationToken {
    /// Wrap a token value
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Borrow the wrapped value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwrap the token
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<&str> for ContinuationToken {
    fn from(token: &str) -> Self {
        Self(Value::String(token.to_string()))
    }
}

impl From<String> for ContinuationToken {
    fn from(token: String) -> Self {
        Self(Value::String(token))
    }
}

impl From<Value> for ContinuationToken {
    fn from(token: Value) -> Self {
        Self(token)
    }
}

// ============================================================================
// Raw Result
// ============================================================================

/// Untyped response of a single listing call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawResult {
    /// Records on this page, in service order
    pub records: Vec<RawRecord>,
    /// Token for the following page; `None` means this is the last page
    pub next_token: Option<ContinuationToken>,
    /// Service response the records were taken from, with the records
    /// themselves replaced by `null` (`Null` when the transport has none)
    pub response: Value,
}

impl RawResult {
    /// Create a result from records and an optional next token
    pub fn new(records: Vec<RawRecord>, next_token: Option<ContinuationToken>) -> Self {
        Self {
            records,
            next_token,
            response: Value::Null,
        }
    }

    /// Create a final page (no continuation token)
    pub fn last(records: Vec<RawRecord>) -> Self {
        Self::new(records, None)
    }

    /// Attach the raw service response
    #[must_use]
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    /// Whether a continuation token is present
    pub fn has_next_token(&self) -> bool {
        self.next_token.is_some()
    }

    /// Number of records on the page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Action Parameters
// ============================================================================

/// Parameters of the original listing request.
///
/// Fixed once the first page is requested; every following page is
/// requested with exactly these parameters plus the continuation token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParameters {
    /// Listing action to invoke (e.g. `DescribeKeyPairs`)
    pub action: String,
    /// Filters and resource identifiers
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
    /// Requested page size, if any
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl ActionParameters {
    /// Create parameters for an action with no filters
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: BTreeMap::new(),
            page_size: None,
        }
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

// ============================================================================
// Result Capture
// ============================================================================

/// Receives every raw result fetched on behalf of a caller.
///
/// Observers are for diagnostics only and never affect pagination state.
pub trait ResultObserver: Send + Sync {
    /// Called once per successful listing call
    fn observe(&self, result: &RawResult);
}

impl<F> ResultObserver for F
where
    F: Fn(&RawResult) + Send + Sync,
{
    fn observe(&self, result: &RawResult) {
        self(result);
    }
}

/// Observer that keeps the most recently fetched raw result
#[derive(Debug, Default)]
pub struct ResultCapture {
    inner: Mutex<Captured>,
}

#[derive(Debug, Default)]
struct Captured {
    last: Option<RawResult>,
    count: usize,
}

impl ResultCapture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent raw result, if any was captured
    pub fn result(&self) -> Option<RawResult> {
        self.lock().last.clone()
    }

    /// Take the most recent raw result, leaving the capture empty
    pub fn take(&self) -> Option<RawResult> {
        self.lock().last.take()
    }

    /// How many results have been observed so far
    pub fn captured(&self) -> usize {
        self.lock().count
    }

    fn lock(&self) -> MutexGuard<'_, Captured> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultObserver for ResultCapture {
    fn observe(&self, result: &RawResult) {
        let mut captured = self.lock();
        captured.last = Some(result.clone());
        captured.count += 1;
    }
}
