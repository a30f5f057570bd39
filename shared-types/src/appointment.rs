use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest appointment the server accepts: one working day.
pub const MAX_BOOKING_MINUTES: u32 = 8 * 60;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether an appointment in this status still blocks the professional's
    /// calendar.
    pub fn occupies_calendar(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown appointment status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Appointment built on the client before it is persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewAppointment {
    pub client_id: i32,
    pub professional_id: i32,
    pub service: String,
    pub date: NaiveDateTime,
    pub duration: u32,
    pub status: AppointmentStatus,
    pub price: f64,
    pub address: String,
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn end(&self) -> NaiveDateTime {
        self.date + Duration::minutes(i64::from(self.duration))
    }

    /// Earliest start a stored appointment can have and still overlap this
    /// one, given that none is longer than [`MAX_BOOKING_MINUTES`].
    pub fn conflict_window_start(&self) -> NaiveDateTime {
        self.date - Duration::minutes(i64::from(MAX_BOOKING_MINUTES))
    }

    /// First stored appointment whose interval intersects this one.
    pub fn first_conflict<'a>(&self, existing: &'a [Appointment]) -> Option<&'a Appointment> {
        existing.iter().find(|a| {
            a.professional_id == self.professional_id
                && a.status.occupies_calendar()
                && a.date < self.end()
                && self.date < a.end()
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub client_id: i32,
    pub professional_id: i32,
    pub service: String,
    pub date: NaiveDateTime,
    pub duration: u32,
    pub status: AppointmentStatus,
    pub price: f64,
    pub address: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    pub fn end(&self) -> NaiveDateTime {
        self.date + Duration::minutes(i64::from(self.duration))
    }

    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        self.date <= instant && instant < self.end()
    }

    pub fn from_new(id: i32, created_at: NaiveDateTime, new: NewAppointment) -> Self {
        Appointment {
            id,
            client_id: new.client_id,
            professional_id: new.professional_id,
            service: new.service,
            date: new.date,
            duration: new.duration,
            status: new.status,
            price: new.price,
            address: new.address,
            notes: new.notes,
            created_at,
        }
    }
}
