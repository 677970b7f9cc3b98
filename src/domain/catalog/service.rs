use super::cache::{CacheEntry, CacheKey, QueryCache};
use super::error::CatalogServiceError;
use super::{CatalogQuery, PageResult};
use crate::infrastructure::repositories::CatalogRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A catalog page together with where it came from
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub result: PageResult,
    pub page: u32,
    pub captured_at: DateTime<Utc>,
    pub from_cache: bool,
}

impl CachedPage {
    fn from_entry(entry: CacheEntry, from_cache: bool) -> Self {
        Self {
            result: entry.result,
            page: entry.page,
            captured_at: entry.captured_at,
            from_cache,
        }
    }
}

pub struct CatalogService {
    catalog_repo: Arc<dyn CatalogRepository>,
    cache: QueryCache,
}

impl CatalogService {
    pub fn new(catalog_repo: Arc<dyn CatalogRepository>, cache: QueryCache) -> Self {
        Self {
            catalog_repo,
            cache,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}

#[async_trait]
pub trait CatalogServiceApi: Send + Sync {
    /// Get one page of a listing
    ///
    /// A fresh cache entry for the same (category, language, page) is served
    /// without calling the catalog; otherwise the catalog is called and the
    /// result replaces whatever was cached under that key.
    async fn get_movies(&self, query: &CatalogQuery) -> Result<CachedPage, CatalogServiceError>;
}

#[async_trait]
impl CatalogServiceApi for CatalogService {
    async fn get_movies(&self, query: &CatalogQuery) -> Result<CachedPage, CatalogServiceError> {
        if query.page == 0 {
            return Err(CatalogServiceError::Invalid(
                "page must be at least 1".to_string(),
            ));
        }

        let key = CacheKey::from(query);

        if let Some(entry) = self.cache.get(&key).await {
            tracing::debug!(
                cache_key = %key,
                captured_at = %entry.captured_at,
                "Catalog cache hit"
            );
            return Ok(CachedPage::from_entry(entry, true));
        }

        tracing::info!(cache_key = %key, "Catalog cache miss - fetching page");

        let result = self
            .catalog_repo
            .fetch_page(query)
            .await
            .map_err(CatalogServiceError::Dependency)?;

        let entry = CacheEntry::new(result, query.page);
        self.cache.set(key.clone(), entry.clone()).await;

        tracing::debug!(
            cache_key = %key,
            results = entry.result.results.len(),
            total_pages = entry.result.total_pages,
            "Catalog page cached"
        );

        Ok(CachedPage::from_entry(entry, false))
    }
}
