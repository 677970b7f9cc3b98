use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::catalog::{
        CatalogQuery, CatalogService, CatalogServiceApi, Category, CategoryResponse, Language,
        MoviePageResponse, MovieResponse,
    },
    error::{AppError, AppResult},
};

// Request DTOs
#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

pub struct CatalogController {
    catalog_service: Arc<CatalogService>,
    default_language: Language,
    supported_languages: Vec<Language>,
    image_base_url: String,
}

impl CatalogController {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        default_language: Language,
        supported_languages: Vec<Language>,
        image_base_url: String,
    ) -> Self {
        Self {
            catalog_service,
            default_language,
            supported_languages,
            image_base_url,
        }
    }

    /// GET /api/categories - The four listings with their button labels
    pub async fn list_categories() -> Json<Vec<CategoryResponse>> {
        Json(Category::ALL.into_iter().map(CategoryResponse::from).collect())
    }

    /// GET /api/languages - Languages a session can switch to
    pub async fn list_languages(
        State(controller): State<Arc<CatalogController>>,
    ) -> Json<Vec<Language>> {
        Json(controller.supported_languages.clone())
    }

    /// GET /api/movies - One page of a listing, served from cache when fresh
    pub async fn get_movies(
        State(controller): State<Arc<CatalogController>>,
        Query(query): Query<MoviesQuery>,
    ) -> AppResult<Json<MoviePageResponse>> {
        let category = match query.category.as_deref() {
            Some(value) => value.parse::<Category>()?,
            None => Category::default(),
        };
        let language = match query.language.as_deref() {
            Some(value) => Language::parse(value)?,
            None => controller.default_language.clone(),
        };
        let page = match query.page.as_deref() {
            Some(value) => value
                .parse::<u32>()
                .map_err(|_| AppError::BadRequest(format!("Invalid page: {}", value)))?,
            None => 1,
        };

        let catalog_query = CatalogQuery::new(category, language, page);
        let cached = controller
            .catalog_service
            .get_movies(&catalog_query)
            .await?;

        Ok(Json(MoviePageResponse {
            category: catalog_query.category,
            language: catalog_query.language,
            page: cached.page,
            total_pages: cached.result.total_pages,
            results: cached
                .result
                .results
                .iter()
                .map(|movie| MovieResponse::from_movie(movie, &controller.image_base_url))
                .collect(),
            dates: cached.result.dates,
            cached: cached.from_cache,
            captured_at: cached.captured_at,
        }))
    }
}
