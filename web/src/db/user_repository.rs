use shared_types::{ClientProfile, UserType};
use sqlx::{PgConnection, Row};

use super::entities::{rows, UserRecord};
use crate::error::{AppError, AppResult};

pub async fn find_user_by_email(email: &str) -> AppResult<Option<UserRecord>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(
        "SELECT id, email, password_hash, user_type FROM users WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let raw_type: String = row.try_get("user_type")?;
    let user_type = UserType::parse(&raw_type)
        .ok_or_else(|| AppError::Validation(format!("unknown user type {}", raw_type)))?;

    Ok(Some(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        user_type,
    }))
}

pub async fn create_user(
    conn: &mut PgConnection,
    email: &str,
    password_hash: &str,
    user_type: UserType,
) -> AppResult<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (email, password_hash, user_type) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(password_hash)
    .bind(user_type.as_str())
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}

pub async fn get_client_by_user_id(user_id: i32) -> AppResult<Option<ClientProfile>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(
        "SELECT id, user_id, full_name, email, phone, default_address
         FROM clients WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(rows::client).transpose()?)
}

pub async fn get_client_by_id(client_id: i32) -> AppResult<Option<ClientProfile>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(
        "SELECT id, user_id, full_name, email, phone, default_address
         FROM clients WHERE id = $1",
    )
    .bind(client_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(rows::client).transpose()?)
}

pub async fn create_client(
    conn: &mut PgConnection,
    user_id: i32,
    full_name: &str,
    email: &str,
    phone: Option<&str>,
    default_address: Option<&str>,
) -> AppResult<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO clients (user_id, full_name, email, phone, default_address)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(user_id)
    .bind(full_name)
    .bind(email)
    .bind(phone)
    .bind(default_address)
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}
