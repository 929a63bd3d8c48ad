//! In-memory listing
//!
//! Replays scripted pages keyed by the token they are requested with.
//! Handy for offline fixtures and for exercising pagination without a
//! service.

use super::types::ListingOperation;
use crate::error::{Error, Result};
use crate::pagination::{ActionParameters, ContinuationToken, RawRecord, RawResult};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// One recorded invocation of the listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListCall {
    /// Parameters the call was made with
    pub params: ActionParameters,
    /// Token the call carried
    pub token: Option<ContinuationToken>,
}

/// Listing operation backed by scripted pages
#[derive(Debug, Default)]
pub struct InMemoryListing {
    pages: Vec<(Option<ContinuationToken>, RawResult)>,
    calls: Mutex<Vec<ListCall>>,
    failures: Mutex<Vec<Option<ContinuationToken>>>,
}

impl InMemoryListing {
    /// Create a listing with no pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain of pages linked by generated tokens (`page-2`, `page-3`, ...);
    /// the last page carries no token
    pub fn from_pages<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = Vec<RawRecord>>,
    {
        let pages: Vec<_> = pages.into_iter().collect();
        let count = pages.len();
        let mut listing = Self::new();
        let mut requested_with = None;

        for (i, records) in pages.into_iter().enumerate() {
            let next = (i + 1 < count).then(|| ContinuationToken::from(format!("page-{}", i + 2)));
            listing = listing.page(requested_with, RawResult::new(records, next.clone()));
            requested_with = next;
        }

        listing
    }

    /// Script the first page
    #[must_use]
    pub fn first_page(self, result: RawResult) -> Self {
        self.page(None, result)
    }

    /// Script the page returned for `token`
    #[must_use]
    pub fn page_after(self, token: impl Into<ContinuationToken>, result: RawResult) -> Self {
        self.page(Some(token.into()), result)
    }

    /// Script the page returned for a request carrying `token`
    #[must_use]
    pub fn page(mut self, token: Option<ContinuationToken>, result: RawResult) -> Self {
        self.pages.push((token, result));
        self
    }

    /// Make the next request carrying `token` fail with a 503
    pub fn fail_once(&self, token: Option<ContinuationToken>) {
        lock(&self.failures).push(token);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ListCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl ListingOperation for InMemoryListing {
    async fn list(
        &self,
        params: &ActionParameters,
        token: Option<&ContinuationToken>,
    ) -> Result<RawResult> {
        let token = token.cloned();
        lock(&self.calls).push(ListCall {
            params: params.clone(),
            token: token.clone(),
        });

        {
            let mut failures = lock(&self.failures);
            if let Some(pos) = failures.iter().position(|t| *t == token) {
                failures.remove(pos);
                debug!(action = %params.action, "Injected listing failure");
                return Err(Error::http_status(503, "injected failure"));
            }
        }

        self.pages
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, result)| result.clone())
            .ok_or_else(|| Error::Other(format!("No page scripted for token {token:?}")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
