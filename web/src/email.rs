//! Confirmation email delivery over an HTTP mail API.

use std::time::Duration;

use shared_types::notification::{client_confirmation, professional_notification};
use shared_types::{Appointment, ClientProfile, ConfirmationReceipt, EmailMessage, ProfessionalProfile};
use thiserror::Error;

use crate::config::EmailConfig;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("no email API configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mail API answered {0}")]
    Rejected(reqwest::StatusCode),
}

/// Upper bound for one mail API call, connection included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct EmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(config: EmailConfig, timeout: Duration) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(EmailService { client, config })
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let url = self.config.api_url.as_deref().ok_or(EmailError::NotConfigured)?;

        let mut request = self.client.post(url).json(message);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(EmailError::Rejected(response.status()));
        }
        Ok(())
    }

    /// Sends the client confirmation and the professional notification.
    /// Each failure is logged and reported in the receipt, never returned.
    pub async fn send_booking_confirmation_emails(
        &self,
        appointment: &Appointment,
        professional: &ProfessionalProfile,
        client: &ClientProfile,
    ) -> ConfirmationReceipt {
        let from = self.config.from.as_str();
        let to_client = client_confirmation(from, appointment, professional, client);
        let to_professional = professional_notification(from, appointment, professional, client);

        let (client_result, professional_result) =
            tokio::join!(self.send(&to_client), self.send(&to_professional));

        ConfirmationReceipt {
            client_sent: log_outcome(appointment.id, "client", client_result),
            professional_sent: log_outcome(appointment.id, "professional", professional_result),
        }
    }
}

fn log_outcome(appointment_id: i32, recipient: &str, result: Result<(), EmailError>) -> bool {
    match result {
        Ok(()) => {
            tracing::debug!(appointment_id, recipient, "confirmation email sent");
            true
        }
        Err(EmailError::NotConfigured) => {
            tracing::debug!(appointment_id, recipient, "email API not configured, skipping");
            false
        }
        Err(EmailError::Transport(e)) if e.is_timeout() => {
            tracing::warn!(appointment_id, recipient, error = %e, "confirmation email timed out");
            false
        }
        Err(e) => {
            tracing::warn!(appointment_id, recipient, error = %e, "confirmation email failed");
            false
        }
    }
}
