use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateSuggestionRequest;
use crate::api::dtos::responses::OkResponse;
use crate::domain::models::suggestion::NewSuggestion;
use crate::domain::services::validation::{optional, require_all};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_suggestions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let suggestions = state.suggestion_repo.list().await?;
    Ok(Json(suggestions))
}

pub async fn create_suggestion(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSuggestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let [name, city, place] = require_all(
        [&payload.name, &payload.city, &payload.place],
        "name, city, place required",
    )?;

    let suggestion = NewSuggestion::new(
        name.to_string(),
        city.to_string(),
        place.to_string(),
        optional(payload.maps_link.clone()),
        optional(payload.description.clone()),
    );
    let created = state.suggestion_repo.create(&suggestion).await?;

    info!("Created suggestion {}: {} in {}", created.id, created.place, created.city);
    Ok(Json(OkResponse::ok()))
}

pub async fn delete_suggestion(
    State(state): State<Arc<AppState>>,
    Path(suggestion_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.suggestion_repo.delete(suggestion_id).await?;
    info!(suggestion_id, removed, "Deleted suggestion");
    Ok(Json(OkResponse::ok()))
}
