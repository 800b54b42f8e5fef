pub mod sqlite_user_repo;
pub mod sqlite_city_repo;
pub mod sqlite_place_repo;
pub mod sqlite_event_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_favorite_repo;
pub mod sqlite_suggestion_repo;

pub mod postgres_user_repo;
pub mod postgres_city_repo;
pub mod postgres_place_repo;
pub mod postgres_event_repo;
pub mod postgres_booking_repo;
pub mod postgres_favorite_repo;
pub mod postgres_suggestion_repo;
