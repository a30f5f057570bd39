//! Server-side checks on an appointment request.
//!
//! The browser sends a complete `NewAppointment`, but only the client id,
//! the professional, the service names, the start, the address and the
//! notes are taken from it. Price and duration are recomputed from the
//! professional's catalog.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::appointment::{AppointmentStatus, NewAppointment, MAX_BOOKING_MINUTES};
use crate::profile::{AuthUser, UserType};
use crate::service::{Service, SERVICE_SEPARATOR};
use crate::slot::is_offered_start;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingRequestError {
    #[error("only client accounts can book appointments")]
    NotAClient,

    #[error("appointments can only be booked for your own account")]
    NotYourAccount,

    #[error("new appointments must be pending")]
    NotPending,

    #[error("select at least one service")]
    NoServices,

    #[error("{0:?} is not offered by this professional")]
    UnknownService(String),

    #[error("{0:?} was selected twice")]
    DuplicateService(String),

    #[error("{minutes} minutes is longer than the {max} minute limit", max = MAX_BOOKING_MINUTES)]
    TooLong { minutes: u32 },

    #[error("an address is required")]
    MissingAddress,

    #[error("that time slot is not offered")]
    SlotNotOffered,

    #[error("that time slot has already started")]
    SlotInPast,
}

/// Checks a request from `user` against the professional's `catalog` and
/// returns the appointment to store, with price, duration and address
/// normalized.
pub fn validate_booking_request(
    request: NewAppointment,
    user: &AuthUser,
    catalog: &[Service],
    now: NaiveDateTime,
) -> Result<NewAppointment, BookingRequestError> {
    if user.user_type != UserType::Client {
        return Err(BookingRequestError::NotAClient);
    }
    if request.client_id != user.profile_id {
        return Err(BookingRequestError::NotYourAccount);
    }
    if request.status != AppointmentStatus::Pending {
        return Err(BookingRequestError::NotPending);
    }

    let services = resolve_services(&request.service, catalog)?;
    let duration: u32 = services.iter().map(|s| s.duration).sum();
    if duration > MAX_BOOKING_MINUTES {
        return Err(BookingRequestError::TooLong { minutes: duration });
    }
    let price: f64 = services.iter().map(|s| s.price).sum();

    let address = request.address.trim();
    if address.is_empty() {
        return Err(BookingRequestError::MissingAddress);
    }
    if !is_offered_start(request.date) {
        return Err(BookingRequestError::SlotNotOffered);
    }
    if request.date <= now {
        return Err(BookingRequestError::SlotInPast);
    }

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(NewAppointment {
        service: services
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(SERVICE_SEPARATOR),
        duration,
        price,
        address: address.to_string(),
        notes,
        ..request
    })
}

/// Looks up every name of a joined service field in the catalog.
pub fn resolve_services<'a>(
    summary: &str,
    catalog: &'a [Service],
) -> Result<Vec<&'a Service>, BookingRequestError> {
    let mut resolved: Vec<&Service> = Vec::new();

    for name in summary.split(SERVICE_SEPARATOR).map(str::trim) {
        if name.is_empty() {
            continue;
        }
        if resolved.iter().any(|s| s.name == name) {
            return Err(BookingRequestError::DuplicateService(name.to_string()));
        }
        let service = catalog
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| BookingRequestError::UnknownService(name.to_string()))?;
        resolved.push(service);
    }

    if resolved.is_empty() {
        return Err(BookingRequestError::NoServices);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceCategory;
    use chrono::NaiveDate;

    fn catalog() -> Vec<Service> {
        let service = |id, name: &str, price, duration| Service {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            duration,
            category: ServiceCategory::Plumbing,
        };
        vec![
            service(1, "Drain cleaning", 80.0, 60),
            service(2, "Leak repair", 120.5, 90),
            service(3, "Full repipe", 2400.0, 420),
        ]
    }

    fn client() -> AuthUser {
        AuthUser {
            user_id: 12,
            profile_id: 3,
            email: "client@handybook.test".to_string(),
            user_type: UserType::Client,
        }
    }

    // Sunday noon; the request is for Monday morning.
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn request() -> NewAppointment {
        NewAppointment {
            client_id: 3,
            professional_id: 5,
            service: "Drain cleaning, Leak repair".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            duration: 150,
            status: AppointmentStatus::Pending,
            price: 200.5,
            address: "  123 Main St ".to_string(),
            notes: Some("   ".to_string()),
        }
    }

    fn rejection(request: NewAppointment) -> BookingRequestError {
        validate_booking_request(request, &client(), &catalog(), now()).unwrap_err()
    }

    #[test]
    fn accepts_a_valid_request_and_normalizes_it() {
        let stored = validate_booking_request(request(), &client(), &catalog(), now()).unwrap();
        assert_eq!(stored.service, "Drain cleaning, Leak repair");
        assert_eq!(stored.duration, 150);
        assert_eq!(stored.price, 200.5);
        assert_eq!(stored.address, "123 Main St");
        assert_eq!(stored.notes, None);
    }

    #[test]
    fn price_and_duration_come_from_the_catalog() {
        let stored = validate_booking_request(
            NewAppointment {
                duration: 4320,
                price: 0.01,
                ..request()
            },
            &client(),
            &catalog(),
            now(),
        )
        .unwrap();

        assert_eq!(stored.duration, 150);
        assert_eq!(stored.price, 200.5);
    }

    #[test]
    fn rejects_other_accounts() {
        let professional = AuthUser {
            user_type: UserType::Professional,
            ..client()
        };
        assert_eq!(
            validate_booking_request(request(), &professional, &catalog(), now()),
            Err(BookingRequestError::NotAClient)
        );
        assert_eq!(
            rejection(NewAppointment {
                client_id: 4,
                ..request()
            }),
            BookingRequestError::NotYourAccount
        );
    }

    #[test]
    fn rejects_non_pending_status() {
        assert_eq!(
            rejection(NewAppointment {
                status: AppointmentStatus::Confirmed,
                ..request()
            }),
            BookingRequestError::NotPending
        );
    }

    #[test]
    fn rejects_services_outside_the_catalog() {
        assert_eq!(
            rejection(NewAppointment {
                service: "Drain cleaning, Roof repair".to_string(),
                ..request()
            }),
            BookingRequestError::UnknownService("Roof repair".to_string())
        );
        assert_eq!(
            rejection(NewAppointment {
                service: "Leak repair, Leak repair".to_string(),
                ..request()
            }),
            BookingRequestError::DuplicateService("Leak repair".to_string())
        );
        assert_eq!(
            rejection(NewAppointment {
                service: " ".to_string(),
                ..request()
            }),
            BookingRequestError::NoServices
        );
    }

    #[test]
    fn rejects_bookings_longer_than_a_working_day() {
        assert_eq!(
            rejection(NewAppointment {
                service: "Full repipe, Leak repair".to_string(),
                ..request()
            }),
            BookingRequestError::TooLong { minutes: 510 }
        );
    }

    #[test]
    fn rejects_blank_address() {
        assert_eq!(
            rejection(NewAppointment {
                address: " \t".to_string(),
                ..request()
            }),
            BookingRequestError::MissingAddress
        );
    }

    #[test]
    fn rejects_starts_off_the_grid() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for date in [
            monday.and_hms_opt(12, 30, 0).unwrap(),
            monday.and_hms_opt(9, 15, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 21).unwrap().and_hms_opt(9, 0, 0).unwrap(),
        ] {
            assert_eq!(
                rejection(NewAppointment { date, ..request() }),
                BookingRequestError::SlotNotOffered
            );
        }
    }

    #[test]
    fn rejects_starts_in_the_past() {
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 13)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(
            rejection(NewAppointment {
                date: saturday,
                ..request()
            }),
            BookingRequestError::SlotInPast
        );
    }
}
