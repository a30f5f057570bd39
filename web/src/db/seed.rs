use shared_types::catalog::{sample_services, SAMPLE_PROFESSIONALS};
use shared_types::UserType;

use super::minutes_column;
use super::professional_repository::count_professionals;
use super::user_repository::{create_client, create_user};
use crate::error::{AppError, AppResult};

pub const DEMO_PASSWORD: &str = "handybook-demo";
pub const DEMO_CLIENT_EMAIL: &str = "client@handybook.test";

fn hash(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Validation(format!("Failed to hash password: {}", e)))
}

/// Fills an empty database with one professional per category and a demo
/// client. Does nothing once any professional exists. Everything is written
/// in one transaction, so a failed seed leaves no rows behind.
pub async fn seed_demo_data() -> AppResult<()> {
    if count_professionals().await? > 0 {
        tracing::debug!("professionals present, skipping demo seed");
        return Ok(());
    }

    let password_hash = hash(DEMO_PASSWORD)?;
    let pool = crate::db::pool::get_pool()?;
    let mut tx = pool.begin().await?;

    for &(business_name, category, city, state, email) in SAMPLE_PROFESSIONALS {
        let user_id = create_user(&mut *tx, email, &password_hash, UserType::Professional).await?;

        let professional_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO professionals (user_id, business_name, category, city, state, email, bio)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(user_id)
        .bind(business_name)
        .bind(category.as_str())
        .bind(city)
        .bind(state)
        .bind(email)
        .bind(format!("{} services in {}, {}", category.label(), city, state))
        .fetch_one(&mut *tx)
        .await?;

        for service in sample_services(category) {
            sqlx::query(
                "INSERT INTO services
                    (professional_id, name, description, price, duration_minutes, category)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(professional_id)
            .bind(&service.name)
            .bind(&service.description)
            .bind(service.price)
            .bind(minutes_column(service.duration)?)
            .bind(service.category.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tracing::info!(professional_id, business_name, "seeded demo professional");
    }

    let client_user = create_user(&mut *tx, DEMO_CLIENT_EMAIL, &password_hash, UserType::Client).await?;
    create_client(
        &mut *tx,
        client_user,
        "Demo Client",
        DEMO_CLIENT_EMAIL,
        Some("555-0100"),
        Some("123 Main St, Austin, TX"),
    )
    .await?;

    tx.commit().await?;
    tracing::info!(email = DEMO_CLIENT_EMAIL, "seeded demo client");

    Ok(())
}
