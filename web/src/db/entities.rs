use serde::{Deserialize, Serialize};
use shared_types::{AuthUser, UserType};

/// Account row as stored in `users`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
}

/// Returned by a successful login.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[cfg(feature = "ssr")]
pub(crate) mod rows {
    //! Conversions from raw Postgres rows into domain types.

    use shared_types::{
        Appointment, AppointmentStatus, ClientProfile, ProfessionalProfile, Service,
        ServiceCategory,
    };
    use sqlx::postgres::PgRow;
    use sqlx::Row;

    fn decode_err(column: &str, reason: impl std::fmt::Display) -> sqlx::Error {
        sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: reason.to_string().into(),
        }
    }

    fn category(row: &PgRow, column: &str) -> Result<ServiceCategory, sqlx::Error> {
        row.try_get::<String, _>(column)?
            .parse()
            .map_err(|e| decode_err(column, e))
    }

    fn minutes(row: &PgRow, column: &str) -> Result<u32, sqlx::Error> {
        let value: i32 = row.try_get(column)?;
        u32::try_from(value).map_err(|e| decode_err(column, e))
    }

    pub fn service(row: &PgRow) -> Result<Service, sqlx::Error> {
        Ok(Service {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            duration: minutes(row, "duration_minutes")?,
            category: category(row, "category")?,
        })
    }

    /// Professional without services; callers attach them.
    pub fn professional(row: &PgRow) -> Result<ProfessionalProfile, sqlx::Error> {
        Ok(ProfessionalProfile {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            business_name: row.try_get("business_name")?,
            category: category(row, "category")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            bio: row.try_get("bio")?,
            services: Vec::new(),
        })
    }

    pub fn client(row: &PgRow) -> Result<ClientProfile, sqlx::Error> {
        Ok(ClientProfile {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            default_address: row.try_get("default_address")?,
        })
    }

    pub fn appointment(row: &PgRow) -> Result<Appointment, sqlx::Error> {
        let status: AppointmentStatus = row
            .try_get::<String, _>("status")?
            .parse()
            .map_err(|e| decode_err("status", e))?;

        Ok(Appointment {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            professional_id: row.try_get("professional_id")?,
            service: row.try_get("service")?,
            date: row.try_get("scheduled_at")?,
            duration: minutes(row, "duration_minutes")?,
            status,
            price: row.try_get("price")?,
            address: row.try_get("address")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
