use chrono::NaiveDateTime;
use shared_types::{Appointment, NewAppointment};

use super::entities::rows;
use super::minutes_column;
use crate::error::{AppError, AppResult};

const APPOINTMENT_COLUMNS: &str = "id, client_id, professional_id, service, scheduled_at, \
     duration_minutes, status, price, address, notes, created_at";

/// Inserts the appointment unless it overlaps an existing one.
///
/// The professional's row is locked for the duration of the transaction so
/// two concurrent requests for the same professional cannot both pass the
/// overlap check.
pub async fn create_appointment(new: NewAppointment) -> AppResult<Appointment> {
    let pool = crate::db::pool::get_pool()?;
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT id FROM professionals WHERE id = $1 FOR UPDATE")
        .bind(new.professional_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional {}", new.professional_id)))?;

    let window_start = new.conflict_window_start();
    let nearby = sqlx::query(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments
         WHERE professional_id = $1
         AND status <> 'cancelled'
         AND scheduled_at >= $2 AND scheduled_at < $3"
    ))
    .bind(new.professional_id)
    .bind(window_start)
    .bind(new.end())
    .fetch_all(&mut *tx)
    .await?
    .iter()
    .map(rows::appointment)
    .collect::<Result<Vec<_>, _>>()?;

    if let Some(existing) = new.first_conflict(&nearby) {
        tracing::info!(
            professional_id = new.professional_id,
            conflicting_id = existing.id,
            "appointment request overlaps an existing booking"
        );
        return Err(AppError::SlotTaken);
    }

    let row = sqlx::query(
        "INSERT INTO appointments
            (client_id, professional_id, service, scheduled_at, duration_minutes,
             status, price, address, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING id, created_at",
    )
    .bind(new.client_id)
    .bind(new.professional_id)
    .bind(&new.service)
    .bind(new.date)
    .bind(minutes_column(new.duration)?)
    .bind(new.status.as_str())
    .bind(new.price)
    .bind(&new.address)
    .bind(&new.notes)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    let id: i32 = sqlx::Row::try_get(&row, "id")?;
    let created_at: NaiveDateTime = sqlx::Row::try_get(&row, "created_at")?;
    Ok(Appointment::from_new(id, created_at, new))
}

/// Appointments of one professional starting in `[from, to)`, any status.
pub async fn get_appointments_for_professional(
    professional_id: i32,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> AppResult<Vec<Appointment>> {
    let pool = crate::db::pool::get_pool()?;

    let records = sqlx::query(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments
         WHERE professional_id = $1
         AND scheduled_at >= $2 AND scheduled_at < $3
         ORDER BY scheduled_at"
    ))
    .bind(professional_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    let appointments = records
        .iter()
        .map(rows::appointment)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(appointments)
}

pub async fn get_appointments_for_client(client_id: i32) -> AppResult<Vec<Appointment>> {
    let pool = crate::db::pool::get_pool()?;

    let records = sqlx::query(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments
         WHERE client_id = $1
         ORDER BY scheduled_at DESC"
    ))
    .bind(client_id)
    .fetch_all(pool)
    .await?;

    let appointments = records
        .iter()
        .map(rows::appointment)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(appointments)
}
