//! Page and resource sequences
//!
//! Both sequences are lazy, forward-only and single-pass. A page is only
//! fetched when the caller advances past the previous one, and nothing is
//! fetched after a page without a continuation token has been handed out.

use super::cursor::PageRequest;
use super::page::TypedPage;
use super::types::ResultObserver;
use crate::codec::Codec;
use crate::error::Result;
use futures::stream::{self, Stream};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Position of a sequence
enum SequenceState<T> {
    /// The next page still has to be fetched
    Pending(PageRequest),
    /// The next page is already in hand
    HasPage(TypedPage<T>),
    /// The last page has been emitted
    Exhausted,
}

// ============================================================================
// Page Sequence
// ============================================================================

/// Lazy sequence of the pages of a listing
pub struct PageSequence<T> {
    state: SequenceState<T>,
    codec: Codec<T>,
    observer: Option<Arc<dyn ResultObserver>>,
}

impl<T> PageSequence<T> {
    /// Start at an already-fetched page; emitting it makes no call
    pub fn new(first: TypedPage<T>) -> Self {
        let codec = first.codec().clone();
        Self {
            state: SequenceState::HasPage(first),
            codec,
            observer: None,
        }
    }

    /// Start with a request that is issued on the first advance
    pub fn starting_at(request: PageRequest, codec: Codec<T>) -> Self {
        Self {
            state: SequenceState::Pending(request),
            codec,
            observer: None,
        }
    }

    /// Hand every page fetched by this sequence to an observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ResultObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Whether the last page has already been emitted
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, SequenceState::Exhausted)
    }

    /// Advance to the next page.
    ///
    /// Returns `None` once the page without a continuation token has been
    /// emitted. A failed fetch is returned as `Some(Err(_))` and leaves the
    /// sequence where it was, so advancing again repeats the same call. The
    /// same holds when the returned future is dropped before it completes.
    pub async fn next(&mut self) -> Option<Result<TypedPage<T>>> {
        let page = match std::mem::replace(&mut self.state, SequenceState::Exhausted) {
            SequenceState::Exhausted => return None,
            SequenceState::HasPage(page) => page,
            SequenceState::Pending(request) => {
                // Stays pending until the fetch resolves
                self.state = SequenceState::Pending(request.clone());
                match request.fetch(self.observer.as_deref()).await {
                    Ok(cursor) => TypedPage::new(cursor, self.codec.clone()),
                    Err(e) => return Some(Err(e)),
                }
            }
        };

        self.state = match page.cursor().follow_up() {
            Some(request) => SequenceState::Pending(request),
            None => {
                debug!(action = %page.cursor().params().action, "Reached last page");
                SequenceState::Exhausted
            }
        };

        Some(Ok(page))
    }

    /// Turn the sequence into a [`Stream`] of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<TypedPage<T>>> {
        stream::unfold(self, |mut pages| async move {
            let page = pages.next().await?;
            Some((page, pages))
        })
    }
}

impl<T> fmt::Debug for PageSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            SequenceState::Pending(_) => "pending",
            SequenceState::HasPage(_) => "has_page",
            SequenceState::Exhausted => "exhausted",
        };
        f.debug_struct("PageSequence")
            .field("state", &state)
            .field("observed", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Resource Sequence
// ============================================================================

/// Lazy sequence of the individual resources of a listing
pub struct ResourceSequence<T> {
    pages: PageSequence<T>,
    current: Option<TypedPage<T>>,
    index: usize,
}

impl<T> ResourceSequence<T> {
    /// Start at an already-fetched page
    pub fn new(first: TypedPage<T>) -> Self {
        Self::from_pages(PageSequence::new(first))
    }

    /// Flatten a page sequence
    pub fn from_pages(pages: PageSequence<T>) -> Self {
        Self {
            pages,
            current: None,
            index: 0,
        }
    }

    /// Hand every page fetched by this sequence to an observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ResultObserver>) -> Self {
        self.pages = self.pages.with_observer(observer);
        self
    }

    /// Advance to the next resource.
    ///
    /// Pages are fetched transparently as the current one runs out; empty
    /// pages that still carry a token are skipped. Decoding errors are
    /// reported for the offending record only.
    pub async fn next(&mut self) -> Option<Result<T>> {
        loop {
            if let Some(page) = &self.current {
                if self.index < page.len() {
                    let resource = page.resource(self.index);
                    self.index += 1;
                    return resource;
                }
            }

            match self.pages.next().await? {
                Ok(page) => {
                    self.current = Some(page);
                    self.index = 0;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }

    /// Turn the sequence into a [`Stream`] of resources
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        stream::unfold(self, |mut resources| async move {
            let resource = resources.next().await?;
            Some((resource, resources))
        })
    }
}

impl<T> fmt::Debug for ResourceSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSequence")
            .field("pages", &self.pages)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
