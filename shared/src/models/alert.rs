//! Alert Model

use serde::{Deserialize, Serialize};

/// Alert type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    NewOrder,
    OrderReady,
}

/// Alert entity, a transient notification tied to an order event.
///
/// Mutated only by the read acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub order_id: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: i64,
}
