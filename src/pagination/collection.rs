//! Resource collections
//!
//! The public entry point per resource kind: a listing, the parameters of
//! the request and the codec for the kind.

use super::cursor::PageRequest;
use super::page::TypedPage;
use super::sequence::{PageSequence, ResourceSequence};
use super::types::{ActionParameters, ResultObserver};
use crate::codec::Codec;
use crate::error::Result;
use crate::listing::ListingOperation;
use std::fmt;
use std::sync::Arc;

/// A listable collection of typed resources
pub struct ResourceCollection<T> {
    listing: Arc<dyn ListingOperation>,
    params: Arc<ActionParameters>,
    codec: Codec<T>,
}

impl<T> ResourceCollection<T> {
    /// Create a collection over a listing operation
    pub fn new(
        listing: Arc<dyn ListingOperation>,
        params: ActionParameters,
        codec: Codec<T>,
    ) -> Self {
        Self {
            listing,
            params: Arc::new(params),
            codec,
        }
    }

    /// Parameters every page of this collection is requested with
    pub fn params(&self) -> &ActionParameters {
        &self.params
    }

    /// Codec resources are decoded with
    pub fn codec(&self) -> &Codec<T> {
        &self.codec
    }

    /// Same listing and parameters, different codec
    pub fn with_codec<U>(&self, codec: Codec<U>) -> ResourceCollection<U> {
        ResourceCollection {
            listing: Arc::clone(&self.listing),
            params: Arc::clone(&self.params),
            codec,
        }
    }

    /// Fetch the first page
    pub async fn first_page(&self) -> Result<TypedPage<T>> {
        self.first_page_with(None).await
    }

    /// Fetch the first page, handing the raw result to an observer
    pub async fn first_page_with(
        &self,
        observer: Option<&dyn ResultObserver>,
    ) -> Result<TypedPage<T>> {
        let cursor = self.first_request().fetch(observer).await?;
        Ok(TypedPage::new(cursor, self.codec.clone()))
    }

    /// Fresh sequence over every page; the first page is requested on the
    /// first advance
    pub fn pages(&self) -> PageSequence<T> {
        PageSequence::starting_at(self.first_request(), self.codec.clone())
    }

    /// Fresh sequence over every resource of every page
    pub fn resources(&self) -> ResourceSequence<T> {
        ResourceSequence::from_pages(self.pages())
    }

    fn first_request(&self) -> PageRequest {
        PageRequest::first(Arc::clone(&self.listing), Arc::clone(&self.params))
    }
}

impl<T> Clone for ResourceCollection<T> {
    fn clone(&self) -> Self {
        Self {
            listing: Arc::clone(&self.listing),
            params: Arc::clone(&self.params),
            codec: self.codec.clone(),
        }
    }
}

impl<T> fmt::Debug for ResourceCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCollection")
            .field("params", &self.params)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
