//! Cash Closing Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentMethod;

/// Cash closing entity, a frozen end-of-shift snapshot.
///
/// Never recomputed after creation; payments backdated into the same day
/// show up only in later closings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashClosing {
    pub id: String,
    /// Business date (YYYY-MM-DD, business timezone)
    pub date: String,
    /// Operator-counted cash in the drawer
    pub cash_count_entered: Decimal,
    /// Sum of cash payments recorded for the day
    pub expected_cash: Decimal,
    /// Signed: cash_count_entered - expected_cash (negative = shortfall)
    pub difference: Decimal,
    pub total_sales: Decimal,
    pub total_cash: Decimal,
    pub total_card: Decimal,
    pub total_transactions: u32,
    pub notes: Option<String>,
    pub closed_by: Option<String>,
    pub created_at: i64,
}

/// Generate closing payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashClosingCreate {
    pub cash_count: Decimal,
    pub notes: Option<String>,
    /// Defaults to today in the business timezone
    pub date: Option<String>,
}

/// Per-method aggregate for a set of payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSummary {
    pub method: PaymentMethod,
    pub count: u32,
    pub sum: Decimal,
}

/// Day summary: per-method breakdown plus grand total.
///
/// Invariant: grand_total equals the sum of the per-method sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub methods: Vec<MethodSummary>,
    pub grand_total: Decimal,
    pub transactions: u32,
}
