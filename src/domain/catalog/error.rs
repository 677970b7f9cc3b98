use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
}

impl From<CatalogServiceError> for AppError {
    fn from(err: CatalogServiceError) -> Self {
        match err {
            CatalogServiceError::Invalid(msg) => AppError::BadRequest(msg),
            CatalogServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
