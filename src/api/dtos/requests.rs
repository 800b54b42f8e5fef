use serde::Deserialize;

// Every field is optional at the wire level so a missing field is reported
// with the endpoint's own message instead of a deserialization rejection.

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub event_name: Option<String>,
}

#[derive(Deserialize)]
pub struct AddFavoriteRequest {
    pub user_id: Option<i64>,
    pub event_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateSuggestionRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub place: Option<String>,
    pub maps_link: Option<String>,
    pub description: Option<String>,
}
