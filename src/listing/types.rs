//! Listing operation trait

use crate::error::Result;
use crate::pagination::{ActionParameters, ContinuationToken, RawResult};
use async_trait::async_trait;

/// A remote operation that returns one page of a listing per call.
///
/// Implementations must tolerate being called repeatedly with the same
/// parameters and token; pagination never alters either on its own.
#[async_trait]
pub trait ListingOperation: Send + Sync {
    /// Fetch the page identified by `token` (`None` for the first page)
    async fn list(
        &self,
        params: &ActionParameters,
        token: Option<&ContinuationToken>,
    ) -> Result<RawResult>;
}
