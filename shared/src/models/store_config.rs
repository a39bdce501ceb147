//! Store Configuration Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// System configuration singleton (key `config:system`).
///
/// Source of truth for the tax/service rates used by settlement and for
/// the business timezone used by daily reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub restaurant_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Fraction applied to the order subtotal, e.g. 0.19
    pub tax_rate: Decimal,
    /// Fraction applied to the order subtotal, e.g. 0.10
    pub service_rate: Decimal,
    pub currency: String,
    /// IANA timezone name, e.g. "America/Bogota"
    pub timezone: String,
    pub updated_at: Option<i64>,
    pub updated_by: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            restaurant_name: "SIREST - Globatech".to_string(),
            address: "Calle Principal #123, Bogotá, Colombia".to_string(),
            phone: "+57 300 123 4567".to_string(),
            email: "info@globatech.com".to_string(),
            tax_rate: Decimal::new(19, 2),
            service_rate: Decimal::new(10, 2),
            currency: "COP".to_string(),
            timezone: "America/Bogota".to_string(),
            updated_at: None,
            updated_by: None,
        }
    }
}

/// Update configuration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}
