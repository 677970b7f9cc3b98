use movie_browser::controllers::{catalog::CatalogController, session::SessionController};
use movie_browser::domain::browse::BrowseService;
use movie_browser::domain::catalog::{CatalogService, QueryCache};
use movie_browser::infrastructure::config::{Config, LogFormat};
use movie_browser::infrastructure::http::{build_router, start_http_server};
use movie_browser::infrastructure::repositories::TmdbCatalogRepository;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Movie Browser on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        catalog = %config.tmdb_base_url,
        cache_ttl_seconds = config.cache_ttl_seconds,
        session_idle_minutes = config.session_idle_minutes,
        development = config.is_development(),
        "Catalog configuration loaded"
    );

    let config = Arc::new(config);

    // 1. Instantiate repositories
    let catalog_repo = Arc::new(TmdbCatalogRepository::new(
        config.tmdb_base_url.clone(),
        config.tmdb_api_key.clone(),
    ));

    // 2. Instantiate services (inject repositories)
    let catalog_service = Arc::new(CatalogService::new(
        catalog_repo,
        QueryCache::new(config.cache_ttl()),
    ));
    let browse_service = Arc::new(BrowseService::new(
        catalog_service.clone(),
        config.session_idle(),
        config.default_language.clone(),
        config.supported_languages.clone(),
        config.tmdb_image_base_url.clone(),
    ));

    // 3. Instantiate controllers (inject services)
    let catalog_controller = Arc::new(CatalogController::new(
        catalog_service.clone(),
        config.default_language.clone(),
        config.supported_languages.clone(),
        config.tmdb_image_base_url.clone(),
    ));
    let session_controller = Arc::new(SessionController::new(browse_service.clone()));

    let app = build_router(
        catalog_service,
        browse_service,
        catalog_controller,
        session_controller,
    );

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "movie_browser=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "movie_browser=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
