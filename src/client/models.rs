use serde::{Deserialize, Serialize};
use crate::client::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Local asset path or the server's image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// A booking in the one shape the rest of the client sees, whatever key
/// naming the serving backend used.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Booking {
    pub id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub event_name: String,
}

impl NewBooking {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: Option<String>,
        event_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.filter(|e| !e.trim().is_empty()),
            event_name: event_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        require(&[&self.name, &self.phone, &self.event_name], "name, phone and event are required")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ClientError> {
        require(&[&self.name, &self.email, &self.password], "All fields required")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub maps_link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSuggestion {
    pub name: String,
    pub city: String,
    pub place: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewSuggestion {
    pub fn validate(&self) -> Result<(), ClientError> {
        require(&[&self.name, &self.city, &self.place], "name, city, place required")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub city_id: i64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub maps: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

fn require(fields: &[&String], message: &str) -> Result<(), ClientError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ClientError::Validation(message.to_string()));
    }
    Ok(())
}
