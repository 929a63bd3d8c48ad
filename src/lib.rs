//! # resource-pager
//!
//! Lazy, token-based pagination over cloud resource listings.
//!
//! ## Features
//!
//! - **Opaque Continuation Tokens**: Each page is re-requested with the
//!   original parameters plus the token from the page before it
//! - **Typed Pages**: Raw records are decoded per resource kind through a `Codec`
//! - **Lazy Sequences**: Iterate page by page or resource by resource; nothing
//!   is fetched until the caller advances
//! - **Declarative Services**: Listing actions described in YAML and served
//!   over a retrying, rate-limited HTTP client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resource_pager::{Ec2, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ec2 = Ec2::builtin()?;
//!
//!     let mut pages = ec2.volumes().pages();
//!     while let Some(page) = pages.next().await {
//!         for volume in page?.resources()? {
//!             println!("{}", volume.volume_id);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     ResourceCollection<T>                       │
//! │  first_page() → TypedPage    pages() → PageSequence             │
//! │  resources() → ResourceSequence                                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────┬──────────────────────┐
//! │    Codec     │        PageCursor         │  ListingOperation    │
//! ├──────────────┼───────────────────────────┼──────────────────────┤
//! │ serde        │ params + raw result       │ HttpListing          │
//! │ identity     │ next_page(token)          │ InMemoryListing      │
//! └──────────────┴───────────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Record-to-resource codecs
pub mod codec;

/// Token-based pagination
pub mod pagination;

/// Listing operations and transports
pub mod listing;

/// HTTP client with retry and rate limiting
pub mod http;

/// YAML loader for service definitions
pub mod loader;

/// Built-in service definitions
pub mod services;

/// EC2 resource kinds
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use codec::Codec;
pub use listing::{HttpListing, InMemoryListing, ListingOperation};
pub use loader::{load_service, load_service_from_str, ServiceDefinition};
pub use pagination::{
    ActionParameters, ContinuationToken, PageCursor, PageSequence, RawRecord, RawResult,
    ResourceCollection, ResourceSequence, ResultCapture, ResultObserver, TypedPage,
};
pub use resources::{Ec2, ResourceKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
