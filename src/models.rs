use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct Settings {
    #[serde(with = "crate::ser::hex")]
    pub key: [u8; 64],
}

impl Default for Settings {
    fn default() -> Self {
        Self { key: [0u8; 64] }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Technician,
}

#[derive(Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct TechnicianProfile {
    pub service_type: String,
    pub hourly_rate: f64,
    pub experience_years: Option<u32>,
    pub description: String,
    pub skills: Vec<String>,
    pub rating: f64,
    pub total_reviews: u32,
    pub is_available: bool,
}

#[derive(Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub customer: String,
    pub technician: String,
    pub service_type: String,
    pub description: String,
    pub status: BookingStatus,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub estimated_hours: f64,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub rating: Option<f64>,
    pub review: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_test::{Token, assert_tokens};

    use super::*;

    #[test]
    fn role_lowercase() {
        assert_tokens(
            &Role::Customer,
            &[Token::UnitVariant {
                name: "Role",
                variant: "customer",
            }],
        );
        assert_tokens(
            &Role::Technician,
            &[Token::UnitVariant {
                name: "Role",
                variant: "technician",
            }],
        );
    }

    #[test]
    fn booking_status_snake_case() {
        assert_tokens(
            &BookingStatus::InProgress,
            &[Token::UnitVariant {
                name: "BookingStatus",
                variant: "in_progress",
            }],
        );
    }
}
