pub mod appointment;
pub mod booking_flow;
pub mod booking_request;
pub mod catalog;
pub mod notification;
pub mod profile;
pub mod service;
pub mod slot;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use booking_flow::{BookingFlow, BookingFlowError, BookingReceipt, BookingStage};
pub use booking_request::{validate_booking_request, BookingRequestError};
pub use notification::{ConfirmationReceipt, EmailMessage};
pub use profile::{AuthUser, ClientProfile, ProfessionalProfile, UserType};
pub use service::{SelectedServiceSet, Service, ServiceCategory};
pub use slot::{AvailabilityOracle, BookedAvailability, SimulatedAvailability, TimeSlot};
