//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status lifecycle
///
/// Forward path: pending → preparing → ready → served → paid.
/// `cancelled` is reachable from any non-terminal state.
/// `paid` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Next state along the forward path, if any
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => Some(OrderStatus::Paid),
            OrderStatus::Paid | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    /// Legal transitions: same-state no-op, forward one step, or
    /// any-non-terminal → cancelled.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if *self == target {
            return true;
        }
        if target == OrderStatus::Cancelled {
            return !self.is_terminal();
        }
        self.next() == Some(target)
    }

    /// Orders a cashier may select for settlement
    pub fn is_settleable(&self) -> bool {
        matches!(self, OrderStatus::Ready | OrderStatus::Served)
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    /// Price per unit in currency units
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Sum of unit_price × quantity over the items; the persisted `subtotal`
/// must always equal this.
pub fn subtotal_of(items: &[OrderItem]) -> Decimal {
    items.iter().map(OrderItem::line_total).sum()
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub table_number: String,
    pub waiter: String,
    pub items: Vec<OrderItem>,
    /// Derived: sum of unit_price × quantity, always recomputable from items
    pub subtotal: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    /// Optimistic concurrency counter, bumped on every update
    #[serde(default)]
    pub version: u64,
    /// Set only on the transition to paid
    pub paid_at: Option<i64>,
    pub created_at: i64,
    pub created_by: Option<String>,
    pub updated_at: Option<i64>,
    pub updated_by: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: String,
    pub waiter: String,
    pub items: Vec<OrderItem>,
}

/// Update order payload
///
/// Only the closed field set below is patchable; `id`, stamps and
/// `subtotal` are owned by the server. Item changes recompute `subtotal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    /// Expected current version; mismatch is rejected as a conflict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}
