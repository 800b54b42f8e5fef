use crate::domain::{models::suggestion::{NewSuggestion, Suggestion}, ports::SuggestionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSuggestionRepo {
    pool: SqlitePool,
}

impl SqliteSuggestionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuggestionRepository for SqliteSuggestionRepo {
    async fn create(&self, suggestion: &NewSuggestion) -> Result<Suggestion, AppError> {
        sqlx::query_as::<_, Suggestion>(
            "INSERT INTO suggestions (name, city, place, maps_link, description, created_at) VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id, name, city, place, maps_link, description, created_at"
        )
            .bind(&suggestion.name)
            .bind(&suggestion.city)
            .bind(&suggestion.place)
            .bind(&suggestion.maps_link)
            .bind(&suggestion.description)
            .bind(suggestion.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Suggestion>, AppError> {
        sqlx::query_as::<_, Suggestion>(
            "SELECT id, name, city, place, maps_link, description, created_at FROM suggestions ORDER BY id DESC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM suggestions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
