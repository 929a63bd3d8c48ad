//! Typed pages

use super::cursor::PageCursor;
use super::types::{ContinuationToken, RawRecord, ResultObserver};
use crate::codec::Codec;
use crate::error::Result;
use std::fmt;

/// A page cursor viewed through a codec
pub struct TypedPage<T> {
    cursor: PageCursor,
    codec: Codec<T>,
}

impl<T> TypedPage<T> {
    /// Decorate a cursor with a codec
    pub fn new(cursor: PageCursor, codec: Codec<T>) -> Self {
        Self { cursor, codec }
    }

    /// The underlying raw page
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Drop the codec and keep the raw page
    pub fn into_cursor(self) -> PageCursor {
        self.cursor
    }

    /// Codec used to decode this page
    pub fn codec(&self) -> &Codec<T> {
        &self.codec
    }

    /// Raw records on this page
    pub fn raw_records(&self) -> &[RawRecord] {
        self.cursor.records()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.cursor.records().len()
    }

    /// Whether this page holds no records. Empty pages may still have a
    /// following page.
    pub fn is_empty(&self) -> bool {
        self.cursor.records().is_empty()
    }

    /// Decode the record at `index`
    pub fn resource(&self, index: usize) -> Option<Result<T>> {
        self.cursor
            .records()
            .get(index)
            .map(|record| self.codec.decode(record))
    }

    /// Decode every record on the page, in order
    pub fn resources(&self) -> Result<Vec<T>> {
        self.cursor
            .records()
            .iter()
            .map(|record| self.codec.decode(record))
            .collect()
    }

    /// Token for the following page, if any
    pub fn next_token(&self) -> Option<&ContinuationToken> {
        self.cursor.next_token()
    }

    /// Whether a following page can be requested
    pub fn has_next_page(&self) -> bool {
        self.cursor.has_next_page()
    }

    /// Fetch the following page, decoded with the same codec
    pub async fn next_page(&self, observer: Option<&dyn ResultObserver>) -> Result<TypedPage<T>> {
        let cursor = self.cursor.next_page(observer).await?;
        Ok(TypedPage::new(cursor, self.codec.clone()))
    }
}

impl<T> Clone for TypedPage<T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            codec: self.codec.clone(),
        }
    }
}

impl<T> fmt::Debug for TypedPage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedPage")
            .field("cursor", &self.cursor)
            .field("codec", &self.codec)
            .finish()
    }
}
