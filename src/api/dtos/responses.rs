use crate::domain::models::{city::City, event::Event, place::Place, user::UserProfile};
use crate::domain::services::images::image_url;
use serde::Serialize;

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct CityResponse {
    #[serde(flatten)]
    pub city: City,
    pub image: String,
}

impl CityResponse {
    pub fn new(city: City, base_url: &str) -> Self {
        let image = image_url(base_url, "cities", city.id);
        Self { city, image }
    }
}

#[derive(Serialize)]
pub struct PlaceResponse {
    #[serde(flatten)]
    pub place: Place,
    pub image: String,
}

impl PlaceResponse {
    pub fn new(place: Place, base_url: &str) -> Self {
        let image = image_url(base_url, "places", place.id);
        Self { place, image }
    }
}

#[derive(Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub image: String,
}

impl EventResponse {
    pub fn new(event: Event, base_url: &str) -> Self {
        let image = image_url(base_url, "events", event.id);
        Self { event, image }
    }
}
