use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Place {
    pub id: i64,
    pub city_id: i64,
    pub slug: String,
    pub title: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub maps: Option<String>,
    pub image_path: Option<String>,
}
