//! Pagination module
//!
//! Token-based pagination over a listing operation.
//!
//! # Overview
//!
//! A listing call returns one page of raw records and an opaque
//! continuation token. The pieces here thread that token from page to page:
//!
//! - [`PageCursor`] - one raw page; `next_page` re-issues the listing with
//!   the same parameters and the page's token
//! - [`TypedPage`] - a cursor decoded through a [`Codec`](crate::codec::Codec)
//! - [`PageSequence`] / [`ResourceSequence`] - lazy, single-pass iteration
//!   over pages or individual resources
//! - [`ResourceCollection`] - the per-kind entry point producing all of the above

mod collection;
mod cursor;
mod page;
mod sequence;
mod types;

pub use collection::ResourceCollection;
pub use cursor::{PageCursor, PageRequest};
pub use page::TypedPage;
pub use sequence::{PageSequence, ResourceSequence};
pub use types::{
    ActionParameters, ContinuationToken, RawRecord, RawResult, ResultCapture, ResultObserver,
};
