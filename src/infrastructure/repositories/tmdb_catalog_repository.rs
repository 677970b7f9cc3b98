use super::catalog_repository::CatalogRepository;
use crate::domain::catalog::{CatalogQuery, DateRange, Movie, PageResult};
use async_trait::async_trait;
use serde::Deserialize;

pub const TMDB_DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Body of `GET /movie/{category}`
#[derive(Debug, Deserialize)]
struct TmdbListResponse {
    #[serde(default)]
    results: Vec<Movie>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    dates: Option<DateRange>,
}

/// TMDB implementation of the catalog repository
pub struct TmdbCatalogRepository {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl TmdbCatalogRepository {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn list_url(&self, query: &CatalogQuery) -> String {
        format!(
            "{}/movie/{}?language={}&api_key={}&page={}",
            self.base_url,
            query.category,
            urlencoding::encode(query.language.as_str()),
            urlencoding::encode(&self.api_key),
            query.page
        )
    }
}

#[async_trait]
impl CatalogRepository for TmdbCatalogRepository {
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<PageResult, String> {
        tracing::debug!(
            category = %query.category,
            language = %query.language,
            page = query.page,
            "Calling TMDB movie list API"
        );

        // reqwest errors print the request URL, which carries the API key
        let response = self
            .http_client
            .get(self.list_url(query))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| format!("TMDB request failed: {}", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("TMDB returned {}: {}", status, error_text));
        }

        let body = response
            .json::<TmdbListResponse>()
            .await
            .map_err(|e| format!("Failed to parse TMDB response: {}", e.without_url()))?;

        Ok(PageResult {
            results: body.results,
            total_pages: body.total_pages,
            dates: body.dates,
        })
    }
}
