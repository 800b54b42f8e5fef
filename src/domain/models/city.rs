use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub short: Option<String>,
    pub image_path: Option<String>,
}
