pub mod error;
pub mod grid;
pub mod service;
pub mod session;

pub use error::BrowseServiceError;
pub use grid::GridColor;
pub use service::{BrowseService, BrowseServiceApi};
pub use session::{BrowseSession, FetchTicket, PageAdvance};

use crate::domain::catalog::{Category, DateRange, Language, MovieResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/sessions
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Request for PUT /api/sessions/{id}/category
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeCategoryRequest {
    pub category: String,
}

/// Request for PUT /api/sessions/{id}/language
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeLanguageRequest {
    pub language: String,
}

/// Request for PUT /api/sessions/{id}/selection
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectMovieRequest {
    pub movie_id: i64,
}

/// One cell of the grid
#[derive(Debug, Serialize, Deserialize)]
pub struct GridMovieResponse {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub color: GridColor,
    pub color_class: String,
}

/// Snapshot of a browsing session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub category: Category,
    pub language: Language,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub loading: bool,
    pub movies: Vec<GridMovieResponse>,
    pub selected: Option<MovieResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn from_session(session: &BrowseSession, image_base_url: &str) -> Self {
        let movies = session
            .movies()
            .iter()
            .enumerate()
            .map(|(index, movie)| {
                let color = GridColor::for_index(index);
                GridMovieResponse {
                    movie: MovieResponse::from_movie(movie, image_base_url),
                    color,
                    color_class: color.css_class().to_string(),
                }
            })
            .collect();

        let date_range = if session.category().shows_date_range() {
            session.dates().copied()
        } else {
            None
        };

        Self {
            id: session.id(),
            category: session.category(),
            language: session.language().clone(),
            page: session.page(),
            total_pages: session.total_pages(),
            has_more: session.has_more(),
            loading: session.is_loading(),
            movies,
            selected: session
                .selected()
                .map(|movie| MovieResponse::from_movie(movie, image_base_url)),
            date_range,
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Response for POST /api/sessions/{id}/next-page
#[derive(Debug, Serialize, Deserialize)]
pub struct NextPageResponse {
    pub outcome: PageAdvance,
    pub session: SessionResponse,
}
