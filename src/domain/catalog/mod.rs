pub mod cache;
pub mod error;
pub mod model;
pub mod service;

pub use cache::{CacheEntry, CacheKey, QueryCache};
pub use error::CatalogServiceError;
pub use model::{DateRange, Movie, PageResult};
pub use service::{CachedPage, CatalogService, CatalogServiceApi};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("language regex should compile"));

/// Catalog segment a listing is drawn from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Popular,
    NowPlaying,
    TopRated,
    Upcoming,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Popular,
        Category::NowPlaying,
        Category::TopRated,
        Category::Upcoming,
    ];

    /// Path segment used by the catalog API
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Popular => "popular",
            Category::NowPlaying => "now_playing",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
        }
    }

    /// Button label, e.g. `NOW PLAYING`
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }

    /// Only date-bounded listings carry a meaningful `dates` range
    pub fn shows_date_range(&self) -> bool {
        matches!(self, Category::NowPlaying | Category::Upcoming)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CatalogServiceError::Invalid(format!("Unknown category: {}", s)))
    }
}

/// ISO 639-1 language code, optionally with a region (`pt-BR`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub fn parse(code: &str) -> Result<Self, CatalogServiceError> {
        if !LANGUAGE_PATTERN.is_match(code) {
            return Err(CatalogServiceError::Invalid(format!(
                "Invalid language code: {}",
                code
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Language {
    type Error = CatalogServiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::parse(&value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters of a single catalog page request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    pub category: Category,
    pub language: Language,
    pub page: u32,
}

impl CatalogQuery {
    pub fn new(category: Category, language: Language, page: u32) -> Self {
        Self {
            category,
            language,
            page,
        }
    }
}

/// Movie as exposed over HTTP, with the poster resolved to a full URL
#[derive(Debug, Serialize, Deserialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub release_date: String,
    pub popularity: f64,
    pub vote_average: f64,
    pub original_language: String,
}

impl MovieResponse {
    pub fn from_movie(movie: &Movie, image_base_url: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            poster_url: movie
                .poster_path
                .as_ref()
                .map(|path| format!("{}{}", image_base_url, path)),
            release_date: movie.release_date.clone(),
            popularity: movie.popularity,
            vote_average: movie.vote_average,
            original_language: movie.original_language.clone(),
        }
    }
}

/// Response for GET /api/categories
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Category,
    pub label: String,
    pub shows_date_range: bool,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category,
            label: category.label(),
            shows_date_range: category.shows_date_range(),
        }
    }
}

/// Response for GET /api/movies
#[derive(Debug, Serialize, Deserialize)]
pub struct MoviePageResponse {
    pub category: Category,
    pub language: Language,
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<MovieResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
    pub cached: bool,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}
