pub mod booking_confirm_modal;
pub mod error;
pub mod loading;
pub mod navbar;
pub mod service_selector;
pub mod time_slot_picker;

pub use booking_confirm_modal::BookingConfirmModal;
pub use service_selector::ServiceSelector;
pub use time_slot_picker::TimeSlotPicker;
