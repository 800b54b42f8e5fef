use crate::domain::{models::{event::Event, favorite::Favorite}, ports::FavoriteRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresFavoriteRepo {
    pool: PgPool,
}

impl PostgresFavoriteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepo {
    async fn add(&self, user_id: i64, event_id: i64) -> Result<Option<Favorite>, AppError> {
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, event_id, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, event_id) DO NOTHING \
             RETURNING id, user_id, event_id, created_at"
        )
            .bind(user_id)
            .bind(event_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_events(&self, user_id: i64) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT e.id, e.name, e.season, e.place, e.description, e.type, e.image_path \
             FROM favorites f JOIN events e ON f.event_id = e.id \
             WHERE f.user_id = $1 ORDER BY f.id ASC"
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, user_id: i64, event_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
