use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, auth, catalog, image, booking, favorite, suggestion};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    services::ServeDir,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(&state.config.uploads_dir);

    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))

        // Catalog
        .route("/cities", get(catalog::list_cities))
        .route("/places/{id}", get(catalog::list_places))
        .route("/events", get(catalog::list_events))

        // Images
        .route("/cities/{id}/image", get(image::city_image))
        .route("/places/{id}/image", get(image::place_image))
        .route("/events/{id}/image", get(image::event_image))
        .nest_service("/uploads", uploads)

        // Suggestions
        .route("/suggestions", get(suggestion::list_suggestions))
        .route("/addSuggestion", post(suggestion::create_suggestion))
        .route("/deleteSuggestion/{id}", delete(suggestion::delete_suggestion))

        // Bookings
        .route("/bookings", get(booking::list_bookings))
        .route("/addBooking", post(booking::create_booking))
        .route("/deleteBooking/{id}", delete(booking::delete_booking))

        // Favorites
        .route("/favorites/{user_id}", get(favorite::list_favorites))
        .route("/addFavorite", post(favorite::add_favorite))
        .route("/deleteFavorite/{user_id}/{event_id}", delete(favorite::delete_favorite))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
