//! Page cursors
//!
//! A cursor is one fetched page plus everything needed to fetch the
//! page after it. Cursors are immutable: moving forward builds a new one.

use super::types::{ActionParameters, ContinuationToken, RawRecord, RawResult, ResultObserver};
use crate::error::{Error, Result};
use crate::listing::ListingOperation;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Page Request
// ============================================================================

/// A listing call that has not been issued yet
#[derive(Clone)]
pub struct PageRequest {
    listing: Arc<dyn ListingOperation>,
    params: Arc<ActionParameters>,
    token: Option<ContinuationToken>,
}

impl PageRequest {
    /// Request for the first page of a listing
    pub fn first(listing: Arc<dyn ListingOperation>, params: Arc<ActionParameters>) -> Self {
        Self {
            listing,
            params,
            token: None,
        }
    }

    /// Parameters the call will be issued with
    pub fn params(&self) -> &ActionParameters {
        &self.params
    }

    /// Continuation token the call will carry (`None` for the first page)
    pub fn token(&self) -> Option<&ContinuationToken> {
        self.token.as_ref()
    }

    /// Issue the listing call and wrap its result in a new cursor
    pub async fn fetch(&self, observer: Option<&dyn ResultObserver>) -> Result<PageCursor> {
        let result = self
            .listing
            .list(&self.params, self.token.as_ref())
            .await?;

        debug!(
            action = %self.params.action,
            continued = self.token.is_some(),
            records = result.len(),
            has_next = result.has_next_token(),
            "Fetched page"
        );

        if let Some(observer) = observer {
            observer.observe(&result);
        }

        Ok(PageCursor {
            listing: Arc::clone(&self.listing),
            params: Arc::clone(&self.params),
            result,
        })
    }
}

impl fmt::Debug for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRequest")
            .field("params", &self.params)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Page Cursor
// ============================================================================

/// One page of raw results from a listing
#[derive(Clone)]
pub struct PageCursor {
    listing: Arc<dyn ListingOperation>,
    params: Arc<ActionParameters>,
    result: RawResult,
}

impl PageCursor {
    /// Wrap an already-fetched result
    pub fn new(
        listing: Arc<dyn ListingOperation>,
        params: Arc<ActionParameters>,
        result: RawResult,
    ) -> Self {
        Self {
            listing,
            params,
            result,
        }
    }

    /// Fetch the first page of a listing
    pub async fn first(
        listing: Arc<dyn ListingOperation>,
        params: Arc<ActionParameters>,
        observer: Option<&dyn ResultObserver>,
    ) -> Result<Self> {
        PageRequest::first(listing, params).fetch(observer).await
    }

    /// Parameters of the listing this page belongs to
    pub fn params(&self) -> &ActionParameters {
        &self.params
    }

    /// The raw result held by this page
    pub fn result(&self) -> &RawResult {
        &self.result
    }

    /// Raw records on this page
    pub fn records(&self) -> &[RawRecord] {
        &self.result.records
    }

    /// Token for the following page, if any
    pub fn next_token(&self) -> Option<&ContinuationToken> {
        self.result.next_token.as_ref()
    }

    /// Whether a following page can be requested
    pub fn has_next_page(&self) -> bool {
        self.result.has_next_token()
    }

    /// The request `next_page` would issue
    pub fn next_request(&self) -> Result<PageRequest> {
        self.follow_up().ok_or(Error::NoMorePages)
    }

    /// Fetch the following page.
    ///
    /// Issues exactly one listing call with this page's parameters and
    /// token. Fails with [`Error::NoMorePages`] on the last page.
    pub async fn next_page(&self, observer: Option<&dyn ResultObserver>) -> Result<PageCursor> {
        self.next_request()?.fetch(observer).await
    }

    pub(crate) fn follow_up(&self) -> Option<PageRequest> {
        let token = self.result.next_token.clone()?;
        Some(PageRequest {
            listing: Arc::clone(&self.listing),
            params: Arc::clone(&self.params),
            token: Some(token),
        })
    }
}

impl fmt::Debug for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCursor")
            .field("params", &self.params)
            .field("records", &self.result.len())
            .field("next_token", &self.result.next_token)
            .finish_non_exhaustive()
    }
}
