//! Client-side booking wizard.
//!
//! `BookingFlow` holds everything a client picks while booking one
//! professional and enforces the order of the steps. Network calls stay
//! outside: `begin_submit` hands back the record to send and `finish`
//! receives the outcome.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::appointment::{AppointmentStatus, NewAppointment};
use crate::notification::ConfirmationReceipt;
use crate::profile::AuthUser;
use crate::service::{SelectedServiceSet, Service};
use crate::slot::TimeSlot;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum BookingStage {
    Idle,
    SelectingService,
    SelectingSlot,
    Confirming,
    Submitting,
    Success(BookingReceipt),
    Error(String),
}

/// What the server reports back after a booking is stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingReceipt {
    pub appointment_id: i32,
    pub notifications: ConfirmationReceipt,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingFlowError {
    #[error("Select at least one service first")]
    NoServiceSelected,

    #[error("Select a time slot first")]
    NoSlotSelected,

    #[error("That time slot is no longer available")]
    SlotUnavailable,

    #[error("Sign in to book an appointment")]
    NotAuthenticated,

    #[error("Enter the address where the service should take place")]
    MissingAddress,

    #[error("A booking is already being submitted")]
    SubmissionInFlight,

    #[error("Cannot {action} while {stage}")]
    InvalidTransition {
        action: &'static str,
        stage: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingFlow {
    stage: BookingStage,
    selection: SelectedServiceSet,
    slot: Option<TimeSlot>,
    address: String,
    notes: String,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        BookingFlow {
            stage: BookingStage::Idle,
            selection: SelectedServiceSet::new(),
            slot: None,
            address: String::new(),
            notes: String::new(),
        }
    }

    pub fn stage(&self) -> &BookingStage {
        &self.stage
    }

    pub fn selection(&self) -> &SelectedServiceSet {
        &self.selection
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        self.slot.as_ref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.stage, BookingStage::Submitting)
    }

    /// Slots may be picked once at least one service is chosen.
    pub fn can_choose_slot(&self) -> bool {
        !self.selection.is_empty() && !self.is_submitting()
    }

    pub fn can_confirm(&self) -> bool {
        !self.selection.is_empty()
            && self.slot.as_ref().is_some_and(|s| s.available)
            && !self.is_submitting()
    }

    fn stage_name(&self) -> &'static str {
        match self.stage {
            BookingStage::Idle => "idle",
            BookingStage::SelectingService => "selecting a service",
            BookingStage::SelectingSlot => "selecting a slot",
            BookingStage::Confirming => "confirming",
            BookingStage::Submitting => "submitting",
            BookingStage::Success(_) => "showing a confirmation",
            BookingStage::Error(_) => "showing an error",
        }
    }

    pub fn toggle_service(&mut self, service: &Service) -> Result<bool, BookingFlowError> {
        if self.is_submitting() {
            return Err(BookingFlowError::SubmissionInFlight);
        }

        let selected = self.selection.toggle(service);
        if self.selection.is_empty() {
            self.slot = None;
            self.stage = BookingStage::Idle;
        } else if matches!(
            self.stage,
            BookingStage::Idle | BookingStage::Success(_) | BookingStage::Error(_)
        ) {
            self.stage = BookingStage::SelectingService;
        }
        Ok(selected)
    }

    pub fn select_slot(&mut self, slot: TimeSlot) -> Result<(), BookingFlowError> {
        if self.is_submitting() {
            return Err(BookingFlowError::SubmissionInFlight);
        }
        if self.selection.is_empty() {
            return Err(BookingFlowError::NoServiceSelected);
        }
        if !slot.available {
            return Err(BookingFlowError::SlotUnavailable);
        }

        self.slot = Some(slot);
        self.stage = BookingStage::SelectingSlot;
        Ok(())
    }

    /// Opens the confirmation dialog for a signed-in user.
    pub fn open_confirmation(&mut self, user: Option<&AuthUser>) -> Result<(), BookingFlowError> {
        if self.is_submitting() {
            return Err(BookingFlowError::SubmissionInFlight);
        }
        if self.selection.is_empty() {
            return Err(BookingFlowError::NoServiceSelected);
        }
        match &self.slot {
            None => return Err(BookingFlowError::NoSlotSelected),
            Some(slot) if !slot.available => return Err(BookingFlowError::SlotUnavailable),
            Some(_) => {}
        }
        if user.is_none() {
            return Err(BookingFlowError::NotAuthenticated);
        }

        self.stage = BookingStage::Confirming;
        Ok(())
    }

    pub fn cancel_confirmation(&mut self) -> Result<(), BookingFlowError> {
        if !matches!(self.stage, BookingStage::Confirming) {
            return Err(BookingFlowError::InvalidTransition {
                action: "close the confirmation",
                stage: self.stage_name(),
            });
        }
        self.stage = BookingStage::SelectingSlot;
        Ok(())
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Builds the pending appointment and moves to `Submitting`.
    pub fn begin_submit(
        &mut self,
        client_id: i32,
        professional_id: i32,
    ) -> Result<NewAppointment, BookingFlowError> {
        match self.stage {
            BookingStage::Confirming => {}
            BookingStage::Submitting => return Err(BookingFlowError::SubmissionInFlight),
            _ => {
                return Err(BookingFlowError::InvalidTransition {
                    action: "submit",
                    stage: self.stage_name(),
                })
            }
        }

        let slot = self.slot.as_ref().ok_or(BookingFlowError::NoSlotSelected)?;
        if self.selection.is_empty() {
            return Err(BookingFlowError::NoServiceSelected);
        }
        let address = self.address.trim();
        if address.is_empty() {
            return Err(BookingFlowError::MissingAddress);
        }
        let notes = self.notes.trim();

        let appointment = NewAppointment {
            client_id,
            professional_id,
            service: self.selection.summary_name(),
            date: slot.starts_at(),
            duration: self.selection.total_duration(),
            status: AppointmentStatus::Pending,
            price: self.selection.total_price(),
            address: address.to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        };

        self.stage = BookingStage::Submitting;
        Ok(appointment)
    }

    /// Records the outcome of the creation call. Success clears the
    /// selection; failure keeps it so the client can retry.
    pub fn finish(&mut self, outcome: Result<BookingReceipt, String>) -> Result<(), BookingFlowError> {
        if !self.is_submitting() {
            return Err(BookingFlowError::InvalidTransition {
                action: "finish a submission",
                stage: self.stage_name(),
            });
        }

        match outcome {
            Ok(receipt) => {
                self.selection.clear();
                self.slot = None;
                self.address.clear();
                self.notes.clear();
                self.stage = BookingStage::Success(receipt);
            }
            Err(message) => {
                self.stage = BookingStage::Error(message);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::UserType;
    use crate::service::ServiceCategory;
    use chrono::{NaiveDate, NaiveTime};

    fn s1() -> Service {
        Service {
            id: 1,
            name: "Oil change".to_string(),
            description: "Synthetic oil".to_string(),
            price: 49.0,
            duration: 30,
            category: ServiceCategory::Automobile,
        }
    }

    fn slot(available: bool) -> TimeSlot {
        TimeSlot::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            available,
        )
    }

    fn user() -> AuthUser {
        AuthUser {
            user_id: 4,
            profile_id: 4,
            email: "client@handybook.test".to_string(),
            user_type: UserType::Client,
        }
    }

    fn confirming_flow() -> BookingFlow {
        let mut flow = BookingFlow::new();
        flow.toggle_service(&s1()).unwrap();
        flow.select_slot(slot(true)).unwrap();
        flow.open_confirmation(Some(&user())).unwrap();
        flow
    }

    #[test]
    fn walks_through_every_stage() {
        let mut flow = BookingFlow::new();
        assert_eq!(flow.stage(), &BookingStage::Idle);

        flow.toggle_service(&s1()).unwrap();
        assert_eq!(flow.stage(), &BookingStage::SelectingService);

        flow.select_slot(slot(true)).unwrap();
        assert_eq!(flow.stage(), &BookingStage::SelectingSlot);

        flow.open_confirmation(Some(&user())).unwrap();
        assert_eq!(flow.stage(), &BookingStage::Confirming);

        flow.set_address("123 Main St");
        flow.begin_submit(4, 9).unwrap();
        assert!(flow.is_submitting());
    }

    #[test]
    fn slot_requires_a_service() {
        let mut flow = BookingFlow::new();
        assert_eq!(flow.select_slot(slot(true)), Err(BookingFlowError::NoServiceSelected));
        assert!(!flow.can_choose_slot());
    }

    #[test]
    fn unavailable_slot_blocks_confirmation() {
        let mut flow = BookingFlow::new();
        flow.toggle_service(&s1()).unwrap();

        assert_eq!(flow.select_slot(slot(false)), Err(BookingFlowError::SlotUnavailable));
        assert!(flow.slot().is_none());
        assert!(!flow.can_confirm());
        assert_eq!(
            flow.open_confirmation(Some(&user())),
            Err(BookingFlowError::NoSlotSelected)
        );
        assert_eq!(flow.stage(), &BookingStage::SelectingService);
    }

    #[test]
    fn confirmation_requires_sign_in() {
        let mut flow = BookingFlow::new();
        flow.toggle_service(&s1()).unwrap();
        flow.select_slot(slot(true)).unwrap();

        assert_eq!(flow.open_confirmation(None), Err(BookingFlowError::NotAuthenticated));
        assert_eq!(flow.stage(), &BookingStage::SelectingSlot);
    }

    #[test]
    fn submission_builds_pending_appointment() {
        let mut flow = confirming_flow();
        flow.set_address("  123 Main St ");

        let appointment = flow.begin_submit(4, 9).unwrap();

        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.price, 49.0);
        assert_eq!(appointment.duration, 30);
        assert_eq!(appointment.service, "Oil change");
        assert_eq!(appointment.address, "123 Main St");
        assert_eq!(appointment.notes, None);
        assert_eq!(
            appointment.date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn blank_address_is_rejected() {
        let mut flow = confirming_flow();
        flow.set_address("   ");
        assert_eq!(flow.begin_submit(4, 9), Err(BookingFlowError::MissingAddress));
        assert_eq!(flow.stage(), &BookingStage::Confirming);
    }

    #[test]
    fn second_submit_is_rejected_while_in_flight() {
        let mut flow = confirming_flow();
        flow.set_address("123 Main St");
        flow.begin_submit(4, 9).unwrap();

        assert_eq!(flow.begin_submit(4, 9), Err(BookingFlowError::SubmissionInFlight));
        assert_eq!(flow.toggle_service(&s1()), Err(BookingFlowError::SubmissionInFlight));
    }

    #[test]
    fn email_failure_still_reports_success() {
        let mut flow = confirming_flow();
        flow.set_address("123 Main St");
        flow.set_notes("Gate code 42");
        flow.begin_submit(4, 9).unwrap();

        let receipt = BookingReceipt {
            appointment_id: 17,
            notifications: ConfirmationReceipt {
                client_sent: false,
                professional_sent: false,
            },
        };
        flow.finish(Ok(receipt.clone())).unwrap();

        assert_eq!(flow.stage(), &BookingStage::Success(receipt));
        assert!(flow.selection().is_empty());
        assert!(flow.slot().is_none());
        assert!(flow.address().is_empty());
        assert!(flow.notes().is_empty());
    }

    #[test]
    fn creation_failure_keeps_selection_for_retry() {
        let mut flow = confirming_flow();
        flow.set_address("123 Main St");
        flow.begin_submit(4, 9).unwrap();

        flow.finish(Err("Failed to create appointment".to_string())).unwrap();

        assert!(matches!(flow.stage(), BookingStage::Error(_)));
        assert_eq!(flow.selection().len(), 1);
        assert!(flow.slot().is_some());

        flow.open_confirmation(Some(&user())).unwrap();
        assert!(flow.begin_submit(4, 9).is_ok());
    }

    #[test]
    fn emptying_the_selection_drops_the_slot() {
        let mut flow = BookingFlow::new();
        flow.toggle_service(&s1()).unwrap();
        flow.select_slot(slot(true)).unwrap();

        flow.toggle_service(&s1()).unwrap();

        assert_eq!(flow.stage(), &BookingStage::Idle);
        assert!(flow.slot().is_none());
    }

    #[test]
    fn finish_without_submit_is_an_invalid_transition() {
        let mut flow = BookingFlow::new();
        assert!(matches!(
            flow.finish(Err("boom".to_string())),
            Err(BookingFlowError::InvalidTransition { .. })
        ));
        assert!(matches!(
            flow.cancel_confirmation(),
            Err(BookingFlowError::InvalidTransition { .. })
        ));
    }
}
