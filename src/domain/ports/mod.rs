use crate::domain::models::{
    booking::{Booking, NewBooking}, city::City, event::Event, favorite::Favorite, place::Place,
    suggestion::{NewSuggestion, Suggestion}, user::{NewUser, User},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<City>, AppError>;
    async fn find_image_path(&self, id: i64) -> Result<Option<String>, AppError>;
}

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Place>, AppError>;
    async fn find_image_path(&self, id: i64) -> Result<Option<String>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn find_image_path(&self, id: i64) -> Result<Option<String>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Insert-if-absent. `None` means the pair was already stored.
    async fn add(&self, user_id: i64, event_id: i64) -> Result<Option<Favorite>, AppError>;
    async fn list_events(&self, user_id: i64) -> Result<Vec<Event>, AppError>;
    async fn delete(&self, user_id: i64, event_id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    async fn create(&self, suggestion: &NewSuggestion) -> Result<Suggestion, AppError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Suggestion>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
