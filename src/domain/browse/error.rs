use crate::domain::catalog::CatalogServiceError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum BrowseServiceError {
    #[error("session not found")]
    SessionNotFound,
    #[error("movie {0} is not in the grid")]
    MovieNotFound(i64),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),
}

impl From<BrowseServiceError> for AppError {
    fn from(err: BrowseServiceError) -> Self {
        match err {
            BrowseServiceError::SessionNotFound => {
                AppError::NotFound("Session not found".to_string())
            }
            BrowseServiceError::MovieNotFound(id) => {
                AppError::NotFound(format!("Movie {} not found in session", id))
            }
            BrowseServiceError::Invalid(msg) => AppError::BadRequest(msg),
            BrowseServiceError::Catalog(e) => AppError::from(e),
        }
    }
}
