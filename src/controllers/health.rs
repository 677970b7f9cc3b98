use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::{browse::BrowseService, catalog::CatalogService};

pub type HealthState = (Arc<CatalogService>, Arc<BrowseService>);

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness never calls the catalog: it only reports local state
pub async fn health_ready(
    State((catalog_service, browse_service)): State<HealthState>,
) -> impl IntoResponse {
    let cache = catalog_service.cache();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "catalog": "configured",
            "cache_entries": cache.entry_count(),
            "cache_ttl_seconds": cache.ttl().as_secs(),
            "sessions": browse_service.session_count(),
        })),
    )
}
