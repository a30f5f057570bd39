use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Automobile,
    Plumbing,
    Locksmith,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Automobile,
        ServiceCategory::Plumbing,
        ServiceCategory::Locksmith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Automobile => "automobile",
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Locksmith => "locksmith",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Automobile => "Automobile",
            ServiceCategory::Plumbing => "Plumbing",
            ServiceCategory::Locksmith => "Locksmith",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ServiceCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automobile" => Ok(ServiceCategory::Automobile),
            "plumbing" => Ok(ServiceCategory::Plumbing),
            "locksmith" => Ok(ServiceCategory::Locksmith),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Joins service names in an appointment's `service` field.
pub const SERVICE_SEPARATOR: &str = ", ";

/// A bookable offering from a professional's catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Currency units, not cents.
    pub price: f64,
    /// Minutes, always positive.
    pub duration: u32,
    pub category: ServiceCategory,
}

/// Services chosen during one booking session.
///
/// Entries are unique by `name`, not by `id`: two catalog entries sharing a
/// name occupy the same slot in the set. Insertion order is kept so the
/// summary reads in the order the client picked things.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SelectedServiceSet {
    services: Vec<Service>,
}

impl SelectedServiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the service if no selected service has its name, removes the
    /// selected one otherwise. Returns `true` when the service is selected
    /// after the call.
    pub fn toggle(&mut self, service: &Service) -> bool {
        if let Some(pos) = self.services.iter().position(|s| s.name == service.name) {
            self.services.remove(pos);
            false
        } else {
            self.services.push(service.clone());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.iter().any(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn total_price(&self) -> f64 {
        self.services.iter().map(|s| s.price).sum()
    }

    pub fn total_duration(&self) -> u32 {
        self.services.iter().map(|s| s.duration).sum()
    }

    /// Name stored on the appointment record.
    pub fn summary_name(&self) -> String {
        self.services
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(SERVICE_SEPARATOR)
    }

    pub fn clear(&mut self) {
        self.services.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: i32, name: &str, price: f64, duration: u32) -> Service {
        Service {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            duration,
            category: ServiceCategory::Plumbing,
        }
    }

    #[test]
    fn totals_follow_the_current_selection() {
        let drain = service(1, "Drain cleaning", 80.0, 60);
        let leak = service(2, "Leak repair", 120.5, 90);
        let heater = service(3, "Water heater check", 45.25, 30);

        let mut set = SelectedServiceSet::new();
        assert_eq!(set.total_price(), 0.0);
        assert_eq!(set.total_duration(), 0);

        set.toggle(&drain);
        set.toggle(&leak);
        assert_eq!(set.total_price(), 200.5);
        assert_eq!(set.total_duration(), 150);

        set.toggle(&heater);
        set.toggle(&drain);
        assert_eq!(set.total_price(), 165.75);
        assert_eq!(set.total_duration(), 120);
        assert_eq!(set.summary_name(), "Leak repair, Water heater check");
    }

    #[test]
    fn toggling_twice_restores_previous_state() {
        let drain = service(1, "Drain cleaning", 80.0, 60);
        let leak = service(2, "Leak repair", 120.5, 90);

        let mut set = SelectedServiceSet::new();
        set.toggle(&drain);
        let before = set.clone();

        assert!(set.toggle(&leak));
        assert!(!set.toggle(&leak));
        assert_eq!(set, before);
    }

    #[test]
    fn services_with_the_same_name_share_an_entry() {
        let a = service(1, "Rekey lock", 60.0, 30);
        let b = service(2, "Rekey lock", 75.0, 45);

        let mut set = SelectedServiceSet::new();
        assert!(set.toggle(&a));
        assert!(!set.toggle(&b));
        assert!(set.is_empty());
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Locksmith".parse::<ServiceCategory>(), Ok(ServiceCategory::Locksmith));
        assert!("roofing".parse::<ServiceCategory>().is_err());
        assert_eq!(
            serde_json::to_string(&ServiceCategory::Automobile).unwrap(),
            "\"automobile\""
        );
    }
}
