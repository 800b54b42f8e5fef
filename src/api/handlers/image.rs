use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};
use crate::state::AppState;
use crate::domain::services::images::resolve_upload_path;
use crate::error::AppError;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

pub async fn city_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Response, AppError> {
    let stored = state.city_repo.find_image_path(id).await?;
    serve_image(&state, "cities", id, stored, request).await
}

pub async fn place_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Response, AppError> {
    let stored = state.place_repo.find_image_path(id).await?;
    serve_image(&state, "places", id, stored, request).await
}

pub async fn event_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Response, AppError> {
    let stored = state.event_repo.find_image_path(id).await?;
    serve_image(&state, "events", id, stored, request).await
}

async fn serve_image(
    state: &AppState,
    resource: &str,
    id: i64,
    stored: Option<String>,
    request: Request,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound("Image not found".into());

    let path = stored
        .as_deref()
        .and_then(|p| resolve_upload_path(&state.config.uploads_dir, p))
        .ok_or_else(not_found)?;

    let is_file = tokio::fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        debug!("No image file for {} {} at {}", resource, id, path.display());
        return Err(not_found());
    }

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to serve image: {}", e)))?;

    Ok(response.into_response())
}
