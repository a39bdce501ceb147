//! Payment Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Mixed,
    Qr,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Mixed => "mixed",
            PaymentMethod::Qr => "qr",
        }
    }
}

/// Payment status. Payments are append-only, so the only value ever
/// persisted is `completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Completed,
}

/// Computed amount breakdown for a settlement
///
/// Invariant: total = subtotal + tax + service_charge + tip, all
/// components non-negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaymentTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub service_charge: Decimal,
    pub tip: Decimal,
    pub total: Decimal,
}

/// Payment entity (immutable once written)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    /// References exactly one Order
    pub order_id: String,
    /// Denormalized copy for reporting
    pub table_number: String,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub service_charge: Decimal,
    pub tip: Decimal,
    pub total: Decimal,
    /// Cash only; equals total for non-cash methods
    pub received_amount: Decimal,
    /// Cash only: max(0, received_amount - total); zero for non-cash
    pub change: Decimal,
    #[serde(default)]
    pub status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: i64,
    pub created_by: Option<String>,
}

/// Process payment payload
///
/// The server recomputes the breakdown from the order and the configured
/// rates; the optional echoed amounts let the client assert what it
/// displayed and get a validation failure instead of a silent mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub order_id: String,
    pub payment_method: PaymentMethod,
    /// Operator-entered tip, absolute amount
    #[serde(default)]
    pub tip: Decimal,
    /// Cash tendered; required for cash payments
    pub received_amount: Option<Decimal>,
    pub notes: Option<String>,
    /// Client-displayed subtotal (validated if present)
    pub subtotal: Option<Decimal>,
    /// Client-displayed total (validated if present)
    pub total: Option<Decimal>,
}
