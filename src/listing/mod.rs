//! Listing module
//!
//! The operation pagination is driven by, and its transports.
//!
//! # Overview
//!
//! - [`ListingOperation`] - one call, one page, one optional continuation token
//! - [`HttpListing`] - actions declared in a service definition, served over HTTP
//! - [`InMemoryListing`] - scripted pages for fixtures and offline runs
//! - Response extraction helpers for records and tokens

mod extract;
mod http;
mod memory;
mod types;

pub use extract::{extract_token, lookup, take_records, token_to_param};
pub use http::HttpListing;
pub use memory::{InMemoryListing, ListCall};
pub use types::ListingOperation;
