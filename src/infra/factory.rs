use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_city_repo::PostgresCityRepo,
    postgres_event_repo::PostgresEventRepo, postgres_favorite_repo::PostgresFavoriteRepo,
    postgres_place_repo::PostgresPlaceRepo, postgres_suggestion_repo::PostgresSuggestionRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_city_repo::SqliteCityRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_favorite_repo::SqliteFavoriteRepo,
    sqlite_place_repo::SqlitePlaceRepo, sqlite_suggestion_repo::SqliteSuggestionRepo,
    sqlite_user_repo::SqliteUserRepo,
};

/// Connects to the configured database, runs migrations and wires the
/// repositories for that backend.
pub async fn bootstrap_state(config: &Config) -> Result<AppState, sqlx::Error> {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts: PgConnectOptions = database_url.parse::<PgConnectOptions>()?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Ok(postgres_state(config.clone(), pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Ok(sqlite_state(config.clone(), pool))
    }
}

pub fn sqlite_state(config: Config, pool: SqlitePool) -> AppState {
    AppState {
        config,
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        city_repo: Arc::new(SqliteCityRepo::new(pool.clone())),
        place_repo: Arc::new(SqlitePlaceRepo::new(pool.clone())),
        event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        favorite_repo: Arc::new(SqliteFavoriteRepo::new(pool.clone())),
        suggestion_repo: Arc::new(SqliteSuggestionRepo::new(pool)),
    }
}

pub fn postgres_state(config: Config, pool: PgPool) -> AppState {
    AppState {
        config,
        user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
        city_repo: Arc::new(PostgresCityRepo::new(pool.clone())),
        place_repo: Arc::new(PostgresPlaceRepo::new(pool.clone())),
        event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
        booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
        favorite_repo: Arc::new(PostgresFavoriteRepo::new(pool.clone())),
        suggestion_repo: Arc::new(PostgresSuggestionRepo::new(pool)),
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await?;
    Ok(())
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await?;
    Ok(())
}
