use crate::domain::{models::place::Place, ports::PlaceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePlaceRepo {
    pool: SqlitePool,
}

impl SqlitePlaceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for SqlitePlaceRepo {
    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Place>, AppError> {
        sqlx::query_as::<_, Place>(
            "SELECT id, city_id, slug, title, type, description, maps, image_path FROM places WHERE city_id = ? ORDER BY id ASC"
        )
            .bind(city_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_image_path(&self, id: i64) -> Result<Option<String>, AppError> {
        let path: Option<Option<String>> = sqlx::query_scalar("SELECT image_path FROM places WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(path.flatten())
    }
}
