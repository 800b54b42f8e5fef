use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::base_url::BaseUrl;
use crate::api::dtos::requests::AddFavoriteRequest;
use crate::api::dtos::responses::{EventResponse, OkResponse};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{debug, info};

pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    BaseUrl(base_url): BaseUrl,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.favorite_repo.list_events(user_id).await?;
    let body: Vec<EventResponse> = events
        .into_iter()
        .map(|e| EventResponse::new(e, &base_url))
        .collect();
    Ok(Json(body))
}

pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddFavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(user_id), Some(event_id)) = (payload.user_id, payload.event_id) else {
        return Err(AppError::Validation("Missing user_id or event_id".into()));
    };

    match state.favorite_repo.add(user_id, event_id).await? {
        Some(fav) => info!(user_id, event_id, favorite_id = fav.id, "Added favorite"),
        None => debug!(user_id, event_id, "Favorite already present"),
    }

    Ok(Json(OkResponse::ok()))
}

pub async fn delete_favorite(
    State(state): State<Arc<AppState>>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.favorite_repo.delete(user_id, event_id).await?;
    info!(user_id, event_id, removed, "Deleted favorite");
    Ok(Json(OkResponse::ok()))
}
