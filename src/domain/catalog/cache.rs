use super::{CatalogQuery, PageResult};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::time::Duration;

/// Key of a cached page: `{category}-{language}-{page}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&CatalogQuery> for CacheKey {
    fn from(query: &CatalogQuery) -> Self {
        Self(format!("{}-{}-{}", query.category, query.language, query.page))
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: PageResult,
    pub page: u32,
    pub captured_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(result: PageResult, page: u32) -> Self {
        Self {
            result,
            page,
            captured_at: Utc::now(),
        }
    }

    /// An entry is trusted while its age is strictly below the TTL
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match (now - self.captured_at).to_std() {
            Ok(age) => age >= ttl,
            // captured "in the future" (clock skew): still fresh
            Err(_) => false,
        }
    }
}

/// In-memory page cache shared by every browsing session.
///
/// Entries are dropped once they outlive the TTL or when a newer fetch for
/// the same key overwrites them. There is no capacity bound.
pub struct QueryCache {
    entries: Cache<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        let entries = Cache::builder().time_to_live(ttl).build();
        Self { entries, ttl }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let entry = self.entries.get(key).await?;
        if entry.is_expired(self.ttl, Utc::now()) {
            self.entries.invalidate(key).await;
            return None;
        }
        Some(entry)
    }

    pub async fn set(&self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry).await;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Approximate number of live entries
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}
