use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::base_url::BaseUrl;
use crate::api::dtos::responses::{CityResponse, EventResponse, PlaceResponse};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_cities(
    State(state): State<Arc<AppState>>,
    BaseUrl(base_url): BaseUrl,
) -> Result<impl IntoResponse, AppError> {
    let cities = state.city_repo.list().await?;
    let body: Vec<CityResponse> = cities
        .into_iter()
        .map(|c| CityResponse::new(c, &base_url))
        .collect();
    Ok(Json(body))
}

pub async fn list_places(
    State(state): State<Arc<AppState>>,
    BaseUrl(base_url): BaseUrl,
    Path(city_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let places = state.place_repo.list_by_city(city_id).await?;
    let body: Vec<PlaceResponse> = places
        .into_iter()
        .map(|p| PlaceResponse::new(p, &base_url))
        .collect();
    Ok(Json(body))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    BaseUrl(base_url): BaseUrl,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    let body: Vec<EventResponse> = events
        .into_iter()
        .map(|e| EventResponse::new(e, &base_url))
        .collect();
    Ok(Json(body))
}
