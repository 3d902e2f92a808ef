use crate::{PageRequest, SourceError};
use listings_core::Listing;

/// Produces pages of listings.
///
/// Implementations must return exactly `request.count` listings, each with a fresh id.
/// Filtering by `request.query` is up to the source.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn produce_page(&self, request: &PageRequest) -> Result<Vec<Listing>, SourceError>;
}
