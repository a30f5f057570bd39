use leptos::server_fn::error::ServerFnError;
use shared_types::BookingRequestError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid booking: {0}")]
    Booking(#[from] BookingRequestError),

    #[error("That time slot was just booked, please pick another one")]
    SlotTaken,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Logs the error and converts it for the server function boundary.
    /// Database and configuration details stay in the log.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            AppError::Database(_) | AppError::Config(_) => {
                tracing::error!(error = %self, "request failed");
                ServerFnError::new("Something went wrong on our side, please try again")
            }
            _ => {
                tracing::debug!(error = %self, "request rejected");
                ServerFnError::new(self.to_string())
            }
        }
    }
}
