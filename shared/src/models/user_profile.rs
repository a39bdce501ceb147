//! User Profile Model
//!
//! Identity provisioning lives in the external auth service; this record
//! is the staff profile the POS keeps alongside it.

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Administrator,
    Waiter,
    Cashier,
    Cook,
    Customer,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Administrator)
    }

    pub fn parse(value: &str) -> Option<UserRole> {
        match value {
            "administrator" => Some(UserRole::Administrator),
            "waiter" => Some(UserRole::Waiter),
            "cashier" => Some(UserRole::Cashier),
            "cook" => Some(UserRole::Cook),
            "customer" => Some(UserRole::Customer),
            _ => None,
        }
    }
}

/// User profile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Reason recorded when an account is deactivated
    pub deactivation_note: Option<String>,
    pub deactivated_at: Option<i64>,
    pub deactivated_by: Option<String>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub updated_by: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Update user profile payload (self-service: name/phone only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Administrative user update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivation_note: Option<String>,
}
