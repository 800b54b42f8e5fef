use crate::domain::{models::city::City, ports::CityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCityRepo {
    pool: SqlitePool,
}

impl SqliteCityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for SqliteCityRepo {
    async fn list(&self) -> Result<Vec<City>, AppError> {
        sqlx::query_as::<_, City>("SELECT id, name, short, image_path FROM cities ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_image_path(&self, id: i64) -> Result<Option<String>, AppError> {
        let path: Option<Option<String>> = sqlx::query_scalar("SELECT image_path FROM cities WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(path.flatten())
    }
}
