//! Display helpers shared by the booking views.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use leptos::server_fn::error::ServerFnError;

/// Convert a time to 12-hour format, dropping ":00" minutes.
pub fn convert_to_12_hour_format(time: NaiveTime) -> String {
    let hour = time.hour();
    let (hour_12, period) = if hour == 0 {
        (12, "AM")
    } else if hour < 12 {
        (hour, "AM")
    } else if hour == 12 {
        (12, "PM")
    } else {
        (hour - 12, "PM")
    };

    // Only show minutes if they're not 00
    if time.minute() == 0 {
        format!("{} {}", hour_12, period)
    } else {
        format!("{}:{:02} {}", hour_12, time.minute(), period)
    }
}

pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {} min", h, m),
    }
}

/// "Tue, Jan 16"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

pub fn format_appointment_time(at: NaiveDateTime) -> String {
    format!("{} at {}", at.format("%a, %b %-d %Y"), convert_to_12_hour_format(at.time()))
}

/// The message the server attached, without the transport prefix.
pub fn server_error_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}
