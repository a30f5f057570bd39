pub mod auth;
pub mod home;
pub mod my_appointments;
pub mod not_found;
pub mod professional_profile;
