use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::models::{City, Event, NewBooking, NewSuggestion, Place, Registration, SessionUser, Suggestion};

/// Every call the sync layer and the session holder make against the API.
///
/// Booking rows are returned raw; their field names depend on the backend
/// that served them and are normalized by the caller.
#[async_trait]
pub trait TourismApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError>;
    async fn list_cities(&self) -> Result<Vec<City>, ClientError>;
    async fn list_places(&self, city_id: i64) -> Result<Vec<Place>, ClientError>;

    async fn list_bookings(&self) -> Result<Vec<Value>, ClientError>;
    async fn add_booking(&self, booking: &NewBooking) -> Result<(), ClientError>;
    async fn delete_booking(&self, booking_id: i64) -> Result<(), ClientError>;

    async fn list_favorites(&self, user_id: i64) -> Result<Vec<Event>, ClientError>;
    async fn add_favorite(&self, user_id: i64, event_id: i64) -> Result<(), ClientError>;
    async fn delete_favorite(&self, user_id: i64, event_id: i64) -> Result<(), ClientError>;

    async fn list_suggestions(&self) -> Result<Vec<Suggestion>, ClientError>;
    async fn add_suggestion(&self, suggestion: &NewSuggestion) -> Result<(), ClientError>;
    async fn delete_suggestion(&self, suggestion_id: i64) -> Result<(), ClientError>;

    async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError>;
    async fn register(&self, registration: &Registration) -> Result<(), ClientError>;
}

pub struct HttpTourismApi {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct LoginBody {
    user: SessionUser,
}

impl HttpTourismApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!("GET {}", path);
        let res = self.client.get(self.url(path)).send().await?;
        let res = check(res).await?;
        Ok(res.json::<T>().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ClientError> {
        debug!("POST {}", path);
        let res = self.client.post(self.url(path)).json(body).send().await?;
        check(res).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        debug!("DELETE {}", path);
        let res = self.client.delete(self.url(path)).send().await?;
        check(res).await?;
        Ok(())
    }
}

/// Turns non-success responses into a [`ClientError`] carrying the
/// server's `{"error": ...}` message when one is present.
async fn check(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or_else(|_| if text.is_empty() { status.to_string() } else { text });

    if status.is_server_error() {
        error!("Server error {}: {}", status, message);
    }
    Err(ClientError::from_status(status.as_u16(), message))
}

#[async_trait]
impl TourismApi for HttpTourismApi {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.get_json("/events").await
    }

    async fn list_cities(&self) -> Result<Vec<City>, ClientError> {
        self.get_json("/cities").await
    }

    async fn list_places(&self, city_id: i64) -> Result<Vec<Place>, ClientError> {
        self.get_json(&format!("/places/{}", city_id)).await
    }

    async fn list_bookings(&self) -> Result<Vec<Value>, ClientError> {
        self.get_json("/bookings").await
    }

    async fn add_booking(&self, booking: &NewBooking) -> Result<(), ClientError> {
        self.post_json("/addBooking", booking).await?;
        Ok(())
    }

    async fn delete_booking(&self, booking_id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/deleteBooking/{}", booking_id)).await
    }

    async fn list_favorites(&self, user_id: i64) -> Result<Vec<Event>, ClientError> {
        self.get_json(&format!("/favorites/{}", user_id)).await
    }

    async fn add_favorite(&self, user_id: i64, event_id: i64) -> Result<(), ClientError> {
        self.post_json("/addFavorite", &json!({ "user_id": user_id, "event_id": event_id })).await?;
        Ok(())
    }

    async fn delete_favorite(&self, user_id: i64, event_id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/deleteFavorite/{}/{}", user_id, event_id)).await
    }

    async fn list_suggestions(&self) -> Result<Vec<Suggestion>, ClientError> {
        self.get_json("/suggestions").await
    }

    async fn add_suggestion(&self, suggestion: &NewSuggestion) -> Result<(), ClientError> {
        self.post_json("/addSuggestion", suggestion).await?;
        Ok(())
    }

    async fn delete_suggestion(&self, suggestion_id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/deleteSuggestion/{}", suggestion_id)).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        let res = self.post_json("/login", &json!({ "email": email, "password": password })).await?;
        let body: LoginBody = res.json().await?;
        Ok(body.user)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        self.post_json("/register", registration).await?;
        Ok(())
    }
}
