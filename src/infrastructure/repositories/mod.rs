pub mod catalog_repository;
pub mod tmdb_catalog_repository;

pub use catalog_repository::CatalogRepository;
pub use tmdb_catalog_repository::{TmdbCatalogRepository, TMDB_DEFAULT_BASE_URL};
