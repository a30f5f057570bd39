use shared_types::{ProfessionalProfile, Service};

use super::entities::rows;
use crate::error::AppResult;

const PROFESSIONAL_COLUMNS: &str =
    "id, user_id, business_name, category, city, state, email, phone, bio";

/// All professionals with their service catalogs, ordered by category then name.
pub async fn get_all_professionals() -> AppResult<Vec<ProfessionalProfile>> {
    let pool = crate::db::pool::get_pool()?;

    let records = sqlx::query(&format!(
        "SELECT {PROFESSIONAL_COLUMNS} FROM professionals ORDER BY category, business_name"
    ))
    .fetch_all(pool)
    .await?;

    let mut professionals = records
        .iter()
        .map(rows::professional)
        .collect::<Result<Vec<_>, _>>()?;

    let service_rows = sqlx::query(
        "SELECT id, professional_id, name, description, price, duration_minutes, category
         FROM services
         ORDER BY professional_id, price",
    )
    .fetch_all(pool)
    .await?;

    for row in &service_rows {
        let professional_id: i32 = sqlx::Row::try_get(row, "professional_id")?;
        let service = rows::service(row)?;
        if let Some(p) = professionals.iter_mut().find(|p| p.id == professional_id) {
            p.services.push(service);
        }
    }

    Ok(professionals)
}

pub async fn get_professional_by_id(professional_id: i32) -> AppResult<Option<ProfessionalProfile>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(&format!(
        "SELECT {PROFESSIONAL_COLUMNS} FROM professionals WHERE id = $1"
    ))
    .bind(professional_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut professional = rows::professional(&row)?;
    professional.services = get_services_for_professional(professional_id).await?;
    Ok(Some(professional))
}

pub async fn get_professional_id_for_user(user_id: i32) -> AppResult<Option<i32>> {
    let pool = crate::db::pool::get_pool()?;

    let id = sqlx::query_scalar::<_, i32>("SELECT id FROM professionals WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

pub async fn get_services_for_professional(professional_id: i32) -> AppResult<Vec<Service>> {
    let pool = crate::db::pool::get_pool()?;

    let records = sqlx::query(
        "SELECT id, name, description, price, duration_minutes, category
         FROM services
         WHERE professional_id = $1
         ORDER BY price",
    )
    .bind(professional_id)
    .fetch_all(pool)
    .await?;

    let services = records
        .iter()
        .map(rows::service)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(services)
}

pub async fn count_professionals() -> AppResult<i64> {
    let pool = crate::db::pool::get_pool()?;

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM professionals")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
