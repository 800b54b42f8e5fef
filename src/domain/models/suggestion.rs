use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub place: String,
    pub maps_link: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub name: String,
    pub city: String,
    pub place: String,
    pub maps_link: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewSuggestion {
    pub fn new(
        name: String,
        city: String,
        place: String,
        maps_link: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            name,
            city,
            place,
            maps_link,
            description,
            created_at: Utc::now(),
        }
    }
}
