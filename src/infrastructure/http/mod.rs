use axum::{
    extract::Request,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::{catalog::CatalogController, health, session::SessionController};
use crate::domain::{browse::BrowseService, catalog::CatalogService};
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::{request_id_middleware, RequestId};

/// Build the application router with all routes configured
pub fn build_router(
    catalog_service: Arc<CatalogService>,
    browse_service: Arc<BrowseService>,
    catalog_controller: Arc<CatalogController>,
    session_controller: Arc<SessionController>,
) -> Router {
    // Catalog routes (stateless, cached)
    let catalog_routes = Router::new()
        .route("/api/categories", get(CatalogController::list_categories))
        .route("/api/languages", get(CatalogController::list_languages))
        .route("/api/movies", get(CatalogController::get_movies))
        .with_state(catalog_controller);

    // Browsing session routes
    let session_routes = Router::new()
        .route("/api/sessions", post(SessionController::create_session))
        .route(
            "/api/sessions/:sessionId",
            get(SessionController::get_session).delete(SessionController::delete_session),
        )
        .route(
            "/api/sessions/:sessionId/category",
            put(SessionController::change_category),
        )
        .route(
            "/api/sessions/:sessionId/language",
            put(SessionController::change_language),
        )
        .route(
            "/api/sessions/:sessionId/next-page",
            post(SessionController::next_page),
        )
        .route(
            "/api/sessions/:sessionId/selection",
            put(SessionController::select_movie).delete(SessionController::close_detail),
        )
        .with_state(session_controller);

    // The browser front end is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state((catalog_service, browse_service))
        .merge(catalog_routes)
        .merge(session_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(cors),
        )
}

/// Request span carrying the ID assigned by `request_id_middleware`
fn request_span(request: &Request) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.as_str())
        .unwrap_or_default();

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
