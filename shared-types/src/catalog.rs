//! Demo catalog used to seed a fresh database.

use crate::service::{Service, ServiceCategory};

/// (name, description, price, duration in minutes)
type Entry = (&'static str, &'static str, f64, u32);

const AUTOMOBILE: &[Entry] = &[
    ("Oil change", "Synthetic oil and filter replacement", 49.0, 30),
    ("Brake inspection", "Pads, rotors and fluid check", 65.0, 45),
    ("Battery replacement", "Test and replace the car battery", 120.0, 30),
    ("Tire rotation", "Rotate and balance all four tires", 40.0, 30),
];

const PLUMBING: &[Entry] = &[
    ("Drain cleaning", "Clear clogged sink, tub or floor drains", 80.0, 60),
    ("Leak repair", "Locate and fix leaking pipes or fittings", 120.5, 90),
    ("Water heater check", "Inspect and flush the water heater", 95.0, 60),
    ("Faucet installation", "Replace or install a faucet", 70.0, 45),
];

const LOCKSMITH: &[Entry] = &[
    ("Lockout assistance", "Home or car lockout entry", 95.0, 30),
    ("Rekey lock", "Rekey an existing cylinder", 60.0, 30),
    ("Smart lock installation", "Install and configure a smart lock", 150.0, 60),
    ("Safe opening", "Non-destructive safe opening", 180.0, 90),
];

fn entries(category: ServiceCategory) -> &'static [Entry] {
    match category {
        ServiceCategory::Automobile => AUTOMOBILE,
        ServiceCategory::Plumbing => PLUMBING,
        ServiceCategory::Locksmith => LOCKSMITH,
    }
}

/// Services for one category. Ids are positional and only meaningful
/// before the catalog is persisted.
pub fn sample_services(category: ServiceCategory) -> Vec<Service> {
    entries(category)
        .iter()
        .enumerate()
        .map(|(i, &(name, description, price, duration))| Service {
            id: i as i32 + 1,
            name: name.to_string(),
            description: description.to_string(),
            price,
            duration,
            category,
        })
        .collect()
}

/// (business name, category, city, state, email)
pub const SAMPLE_PROFESSIONALS: &[(&str, ServiceCategory, &str, &str, &str)] = &[
    ("Torque & Tread Garage", ServiceCategory::Automobile, "Austin", "TX", "garage@handybook.test"),
    ("Flow Masters Plumbing", ServiceCategory::Plumbing, "Austin", "TX", "plumbing@handybook.test"),
    ("KeyWise Locksmiths", ServiceCategory::Locksmith, "Round Rock", "TX", "locks@handybook.test"),
];
