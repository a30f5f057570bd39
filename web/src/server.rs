use leptos::prelude::*;
use leptos::server;
use shared_types::{Appointment, BookingReceipt, NewAppointment, ProfessionalProfile, TimeSlot};

use crate::db::entities::LoginResponse;

#[cfg(feature = "ssr")]
use crate::error::AppError;

#[server]
pub async fn get_all_professionals() -> Result<Vec<ProfessionalProfile>, ServerFnError> {
    use crate::db::professional_repository;

    professional_repository::get_all_professionals()
        .await
        .map_err(AppError::into_server_error)
}

#[server]
pub async fn get_professional(professional_id: i32) -> Result<ProfessionalProfile, ServerFnError> {
    use crate::db::professional_repository;

    professional_repository::get_professional_by_id(professional_id)
        .await
        .and_then(|p| p.ok_or_else(|| AppError::NotFound(format!("Professional {}", professional_id))))
        .map_err(AppError::into_server_error)
}

/// Candidate slots for the coming week of one professional.
#[server]
pub async fn get_week_slots(professional_id: i32) -> Result<Vec<TimeSlot>, ServerFnError> {
    use crate::config::{get_config, AvailabilityMode};
    use crate::db::appointment_repository;
    use chrono::{Duration, Local};
    use shared_types::appointment::MAX_BOOKING_MINUTES;
    use shared_types::slot::{generate_week, DAYS_AHEAD};
    use shared_types::{BookedAvailability, SimulatedAvailability};

    let config = get_config()
        .map_err(AppError::from)
        .map_err(AppError::into_server_error)?;

    let now = Local::now().naive_local();
    let today = now.date();

    let slots = match config.availability_mode {
        AvailabilityMode::Simulated => {
            generate_week(today, &mut SimulatedAvailability::from_entropy())
        }
        AvailabilityMode::Booked => {
            let midnight = today.and_hms_opt(0, 0, 0).unwrap_or(now);
            let from = midnight - Duration::minutes(i64::from(MAX_BOOKING_MINUTES));
            let to = midnight + Duration::days(DAYS_AHEAD + 1);
            let booked =
                appointment_repository::get_appointments_for_professional(professional_id, from, to)
                    .await
                    .map_err(AppError::into_server_error)?;
            generate_week(today, &mut BookedAvailability::new(&booked, now))
        }
    };

    tracing::debug!(
        professional_id,
        total = slots.len(),
        available = slots.iter().filter(|s| s.available).count(),
        "generated week slots"
    );

    Ok(slots)
}

#[cfg(feature = "ssr")]
async fn create_appointment_inner(
    token: String,
    appointment: NewAppointment,
) -> Result<BookingReceipt, AppError> {
    use crate::auth::require_client;
    use crate::config::get_config;
    use crate::db::{appointment_repository, professional_repository, user_repository};
    use crate::email::EmailService;
    use chrono::Local;
    use shared_types::{validate_booking_request, ConfirmationReceipt};

    let config = get_config()?;
    let user = require_client(&token, &config.jwt_secret)?;

    let professional = professional_repository::get_professional_by_id(appointment.professional_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional {}", appointment.professional_id)))?;
    let appointment = validate_booking_request(
        appointment,
        &user,
        &professional.services,
        Local::now().naive_local(),
    )?;
    let client = user_repository::get_client_by_id(user.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Client profile".to_string()))?;

    let stored = appointment_repository::create_appointment(appointment).await?;
    tracing::info!(
        appointment_id = stored.id,
        professional_id = stored.professional_id,
        client_id = stored.client_id,
        "appointment created"
    );

    let notifications = match EmailService::new(config.email.clone()) {
        Ok(mailer) => {
            mailer
                .send_booking_confirmation_emails(&stored, &professional, &client)
                .await
        }
        Err(e) => {
            tracing::warn!(appointment_id = stored.id, error = %e, "email client unavailable");
            ConfirmationReceipt::default()
        }
    };

    Ok(BookingReceipt {
        appointment_id: stored.id,
        notifications,
    })
}

/// Stores a pending appointment, then sends confirmation emails.
/// Email failures are reported in the receipt but never fail the booking.
#[server]
pub async fn create_appointment(
    token: String,
    appointment: NewAppointment,
) -> Result<BookingReceipt, ServerFnError> {
    create_appointment_inner(token, appointment)
        .await
        .map_err(AppError::into_server_error)
}

#[server]
pub async fn get_my_appointments(token: String) -> Result<Vec<Appointment>, ServerFnError> {
    use crate::auth::require_client;
    use crate::config::get_config;
    use crate::db::appointment_repository;

    let config = get_config()
        .map_err(AppError::from)
        .map_err(AppError::into_server_error)?;
    let user = require_client(&token, &config.jwt_secret).map_err(AppError::into_server_error)?;

    appointment_repository::get_appointments_for_client(user.profile_id)
        .await
        .map_err(AppError::into_server_error)
}

#[cfg(feature = "ssr")]
async fn login_inner(email: String, password: String) -> Result<LoginResponse, AppError> {
    use crate::auth::issue_token;
    use crate::config::get_config;
    use crate::db::{professional_repository, user_repository};
    use shared_types::{AuthUser, UserType};

    let invalid = || AppError::Unauthorized("invalid email or password".to_string());

    let config = get_config()?;
    let record = user_repository::find_user_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    let matches = bcrypt::verify(&password, &record.password_hash).unwrap_or(false);
    if !matches {
        tracing::debug!(user_id = record.id, "password mismatch");
        return Err(invalid());
    }

    let profile_id = match record.user_type {
        UserType::Client => user_repository::get_client_by_user_id(record.id)
            .await?
            .map(|c| c.id),
        UserType::Professional => professional_repository::get_professional_id_for_user(record.id).await?,
    }
    .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;

    let user = AuthUser {
        user_id: record.id,
        profile_id,
        email: record.email,
        user_type: record.user_type,
    };
    let token = issue_token(&user, &config.jwt_secret)?;
    tracing::info!(user_id = user.user_id, "user signed in");

    Ok(LoginResponse { token, user })
}

#[server]
pub async fn login_user(email: String, password: String) -> Result<LoginResponse, ServerFnError> {
    login_inner(email, password)
        .await
        .map_err(AppError::into_server_error)
}
