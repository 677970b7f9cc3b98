use crate::domain::catalog::{CatalogQuery, PageResult};
use async_trait::async_trait;

/// Repository for movie listings.
/// Abstracts the underlying catalog provider (TMDB, an in-memory fixture, ...)
///
/// Implementations perform exactly one upstream request per call; caching
/// is the caller's concern.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch one page of the listing described by `query`
    ///
    /// # Errors
    /// Returns error if the provider is unreachable, answers with a non-success
    /// status, or sends a body that cannot be parsed
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<PageResult, String>;
}
