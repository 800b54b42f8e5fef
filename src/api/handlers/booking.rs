use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateBookingRequest;
use crate::api::dtos::responses::OkResponse;
use crate::domain::models::booking::NewBooking;
use crate::domain::services::validation::{optional, require_all};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list().await?;
    Ok(Json(bookings))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let [name, phone, event_name] = require_all(
        [&payload.name, &payload.phone, &payload.event_name],
        "Missing required fields",
    )?;

    let booking = NewBooking::new(
        name.to_string(),
        phone.to_string(),
        optional(payload.email.clone()),
        event_name.to_string(),
    );
    let created = state.booking_repo.create(&booking).await?;

    info!("Created booking {} for event {:?}", created.id, created.event_name);
    Ok(Json(OkResponse::ok()))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.booking_repo.delete(booking_id).await?;
    info!(booking_id, removed, "Deleted booking");
    Ok(Json(OkResponse::ok()))
}
