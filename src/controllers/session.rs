use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::browse::{
    BrowseService, BrowseServiceApi, ChangeCategoryRequest, ChangeLanguageRequest,
    CreateSessionRequest, NextPageResponse, SelectMovieRequest, SessionResponse,
};
use crate::error::AppResult;

pub struct SessionController {
    browse_service: Arc<BrowseService>,
}

impl SessionController {
    pub fn new(browse_service: Arc<BrowseService>) -> Self {
        Self { browse_service }
    }

    /// POST /api/sessions - Start browsing, first page loaded
    pub async fn create_session(
        State(controller): State<Arc<SessionController>>,
        Json(request): Json<CreateSessionRequest>,
    ) -> AppResult<(StatusCode, Json<SessionResponse>)> {
        let session = controller.browse_service.create_session(request).await?;
        Ok((StatusCode::CREATED, Json(session)))
    }

    /// GET /api/sessions/{id}
    pub async fn get_session(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<SessionResponse>> {
        let session = controller.browse_service.get_session(session_id).await?;
        Ok(Json(session))
    }

    /// DELETE /api/sessions/{id}
    pub async fn delete_session(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller.browse_service.delete_session(session_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// PUT /api/sessions/{id}/category - Filter change, grid reset
    pub async fn change_category(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<ChangeCategoryRequest>,
    ) -> AppResult<Json<SessionResponse>> {
        let session = controller
            .browse_service
            .change_category(session_id, request)
            .await?;
        Ok(Json(session))
    }

    /// PUT /api/sessions/{id}/language - Filter change, grid reset
    pub async fn change_language(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<ChangeLanguageRequest>,
    ) -> AppResult<Json<SessionResponse>> {
        let session = controller
            .browse_service
            .change_language(session_id, request)
            .await?;
        Ok(Json(session))
    }

    /// POST /api/sessions/{id}/next-page - Sentinel card scrolled into view
    pub async fn next_page(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<NextPageResponse>> {
        let response = controller.browse_service.next_page(session_id).await?;
        Ok(Json(response))
    }

    /// PUT /api/sessions/{id}/selection - Open the detail view
    pub async fn select_movie(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<SelectMovieRequest>,
    ) -> AppResult<Json<SessionResponse>> {
        let session = controller
            .browse_service
            .select_movie(session_id, request)
            .await?;
        Ok(Json(session))
    }

    /// DELETE /api/sessions/{id}/selection - Back to the grid
    pub async fn close_detail(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<SessionResponse>> {
        let session = controller.browse_service.close_detail(session_id).await?;
        Ok(Json(session))
    }
}
