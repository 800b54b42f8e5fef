use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, CityRepository, EventRepository, FavoriteRepository,
    PlaceRepository, SuggestionRepository, UserRepository,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub city_repo: Arc<dyn CityRepository>,
    pub place_repo: Arc<dyn PlaceRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub suggestion_repo: Arc<dyn SuggestionRepository>,
}
