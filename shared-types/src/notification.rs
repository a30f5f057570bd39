//! Booking confirmation emails.
//!
//! Composition lives here so both sides agree on wording; delivery is the
//! server's concern.

use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;
use crate::profile::{ClientProfile, ProfessionalProfile};

/// Which confirmation emails actually went out.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfirmationReceipt {
    pub client_sent: bool,
    pub professional_sent: bool,
}

impl ConfirmationReceipt {
    pub fn all_sent(&self) -> bool {
        self.client_sent && self.professional_sent
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

fn when(appointment: &Appointment) -> String {
    appointment.date.format("%A, %B %-d %Y at %H:%M").to_string()
}

pub fn client_confirmation(
    from: &str,
    appointment: &Appointment,
    professional: &ProfessionalProfile,
    client: &ClientProfile,
) -> EmailMessage {
    let mut text = format!(
        "Hi {},\n\nYour booking request #{} with {} has been received.\n\n\
         Service: {}\nWhen: {}\nDuration: {} minutes\nPrice: ${:.2}\nAddress: {}\n",
        client.full_name,
        appointment.id,
        professional.business_name,
        appointment.service,
        when(appointment),
        appointment.duration,
        appointment.price,
        appointment.address,
    );
    if let Some(notes) = appointment.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        text.push_str(&format!("Notes: {}\n", notes));
    }
    text.push_str(&format!(
        "\nStatus: {}. {} will confirm the appointment shortly.\n",
        appointment.status, professional.business_name
    ));

    EmailMessage {
        from: from.to_string(),
        to: client.email.clone(),
        subject: format!("Booking request sent to {}", professional.business_name),
        text,
    }
}

pub fn professional_notification(
    from: &str,
    appointment: &Appointment,
    professional: &ProfessionalProfile,
    client: &ClientProfile,
) -> EmailMessage {
    let mut text = format!(
        "Hello {},\n\nYou have a new booking request #{} from {}.\n\n\
         Service: {}\nWhen: {}\nDuration: {} minutes\nPrice: ${:.2}\nAddress: {}\n",
        professional.business_name,
        appointment.id,
        client.full_name,
        appointment.service,
        when(appointment),
        appointment.duration,
        appointment.price,
        appointment.address,
    );
    if let Some(phone) = &client.phone {
        text.push_str(&format!("Client phone: {}\n", phone));
    }
    if let Some(notes) = appointment.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        text.push_str(&format!("Notes: {}\n", notes));
    }

    EmailMessage {
        from: from.to_string(),
        to: professional.email.clone(),
        subject: format!("New booking request: {}", appointment.service),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;
    use crate::service::ServiceCategory;
    use chrono::NaiveDate;

    fn fixtures() -> (Appointment, ProfessionalProfile, ClientProfile) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let appointment = Appointment {
            id: 41,
            client_id: 2,
            professional_id: 5,
            service: "Drain cleaning".to_string(),
            date: start,
            duration: 60,
            status: AppointmentStatus::Pending,
            price: 80.0,
            address: "123 Main St".to_string(),
            notes: Some("Side door".to_string()),
            created_at: start,
        };
        let professional = ProfessionalProfile {
            id: 5,
            user_id: 10,
            business_name: "Flow Masters".to_string(),
            category: ServiceCategory::Plumbing,
            city: "Austin".to_string(),
            state: "TX".to_string(),
            email: "pro@flow.test".to_string(),
            phone: None,
            bio: None,
            services: vec![],
        };
        let client = ClientProfile {
            id: 2,
            user_id: 11,
            full_name: "Dana Reyes".to_string(),
            email: "dana@client.test".to_string(),
            phone: Some("555-0101".to_string()),
            default_address: None,
        };
        (appointment, professional, client)
    }

    #[test]
    fn client_email_goes_to_client_with_booking_details() {
        let (appointment, professional, client) = fixtures();
        let msg = client_confirmation("noreply@handybook.test", &appointment, &professional, &client);

        assert_eq!(msg.to, "dana@client.test");
        assert_eq!(msg.subject, "Booking request sent to Flow Masters");
        assert!(msg.text.contains("#41"));
        assert!(msg.text.contains("Monday, January 15 2024 at 09:00"));
        assert!(msg.text.contains("Price: $80.00"));
        assert!(msg.text.contains("Notes: Side door"));
    }

    #[test]
    fn professional_email_includes_client_contact() {
        let (appointment, professional, client) = fixtures();
        let msg =
            professional_notification("noreply@handybook.test", &appointment, &professional, &client);

        assert_eq!(msg.to, "pro@flow.test");
        assert!(msg.text.contains("from Dana Reyes"));
        assert!(msg.text.contains("Client phone: 555-0101"));
    }
}
