use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A visitor's request to attend an event. `event_name` is a copy of the
/// event's name at booking time, not a reference.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub event_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub event_name: String,
    pub created_at: DateTime<Utc>,
}

impl NewBooking {
    pub fn new(name: String, phone: String, email: Option<String>, event_name: String) -> Self {
        Self {
            name,
            phone,
            email,
            event_name,
            created_at: Utc::now(),
        }
    }
}
