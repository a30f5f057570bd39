use serde::{Deserialize, Serialize};

use crate::service::{Service, ServiceCategory};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Client,
    Professional,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => "client",
            UserType::Professional => "professional",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "client" => Some(UserType::Client),
            "professional" => Some(UserType::Professional),
            _ => None,
        }
    }
}

/// The signed-in account, as carried by the session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthUser {
    pub user_id: i32,
    /// Row id in `clients` or `professionals`, depending on `user_type`.
    pub profile_id: i32,
    pub email: String,
    pub user_type: UserType,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProfessionalProfile {
    pub id: i32,
    pub user_id: i32,
    pub business_name: String,
    pub category: ServiceCategory,
    pub city: String,
    pub state: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub services: Vec<Service>,
}

impl ProfessionalProfile {
    pub fn starting_price(&self) -> Option<f64> {
        self.services
            .iter()
            .map(|s| s.price)
            .min_by(|a, b| a.total_cmp(b))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientProfile {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub default_address: Option<String>,
}
