use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use std::sync::OnceLock;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

static DB_POOL: OnceLock<PgPool> = OnceLock::new();

const SCHEMA: &str = include_str!("../../schema.sql");

pub async fn init_pool(config: &AppConfig) -> Result<(), sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    DB_POOL.set(pool).map_err(|_| {
        sqlx::Error::Configuration(
            "Database pool already initialized".to_string().into(),
        )
    })?;

    Ok(())
}

pub fn get_pool() -> AppResult<&'static Pool<Postgres>> {
    DB_POOL.get().ok_or_else(|| {
        AppError::Database(sqlx::Error::Configuration(
            "Database pool not initialized. Call init_pool() first.".into(),
        ))
    })
}

/// Creates missing tables. Every statement is idempotent.
pub async fn apply_schema() -> AppResult<()> {
    let pool = get_pool()?;
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
