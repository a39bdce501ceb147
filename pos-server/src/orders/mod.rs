//! Order lifecycle
//!
//! Governs an order from creation to settlement eligibility and emits
//! alerts on the transitions the floor staff care about. Alert emission
//! is a notification side-channel: a failed alert write is logged and
//! dropped, never propagated into the order write that triggered it.

use rust_decimal::Decimal;

use crate::repository::{AlertRepository, OrderRepository};
use crate::store::KvStore;
use crate::utils::{AppError, AppResult};
use shared::models::{AlertType, Order, OrderCreate, OrderItem, OrderStatus, OrderUpdate};

/// Maximum allowed unit price per item
const MAX_UNIT_PRICE: i64 = 1_000_000;
/// Maximum allowed quantity per item
const MAX_QUANTITY: i32 = 9999;

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    alerts: AlertRepository,
}

impl OrderLifecycle {
    pub fn new(store: KvStore) -> Self {
        Self {
            orders: OrderRepository::new(store.clone()),
            alerts: AlertRepository::new(store),
        }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.orders
    }

    /// Create an order: validate items, compute subtotal, persist as
    /// pending, emit a `new_order` alert.
    pub fn create_order(&self, data: OrderCreate, created_by: Option<String>) -> AppResult<Order> {
        validate_items(&data.items)?;

        let order = self.orders.create(data, created_by)?;
        self.emit_alert(
            AlertType::NewOrder,
            format!("New order for table {}", order.table_number),
            &order.id,
        );
        Ok(order)
    }

    /// Transition an order to a new status.
    ///
    /// Emits an `order_ready` alert when the order newly enters `ready`.
    pub fn update_status(
        &self,
        id: &str,
        target: OrderStatus,
        updated_by: Option<String>,
    ) -> AppResult<Order> {
        let was_ready = self
            .orders
            .find_by_id(id)?
            .map(|o| o.status == OrderStatus::Ready)
            .unwrap_or(false);

        let order = self.orders.transition_status(id, target, updated_by)?;

        if order.status == OrderStatus::Ready && !was_ready {
            self.emit_alert(
                AlertType::OrderReady,
                format!("Order ready for table {}", order.table_number),
                &order.id,
            );
        }
        Ok(order)
    }

    /// Patch an open order (status/waiter/items)
    pub fn update_order(
        &self,
        id: &str,
        data: OrderUpdate,
        updated_by: Option<String>,
    ) -> AppResult<Order> {
        if let Some(items) = &data.items {
            validate_items(items)?;
        }

        let was_ready = self
            .orders
            .find_by_id(id)?
            .map(|o| o.status == OrderStatus::Ready)
            .unwrap_or(false);

        let order = self.orders.update(id, data, updated_by)?;

        if order.status == OrderStatus::Ready && !was_ready {
            self.emit_alert(
                AlertType::OrderReady,
                format!("Order ready for table {}", order.table_number),
                &order.id,
            );
        }
        Ok(order)
    }

    /// Orders a cashier may select for payment (ready or served)
    pub fn list_ready_for_settlement(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_settleable()?)
    }

    fn emit_alert(&self, alert_type: AlertType, message: String, order_id: &str) {
        if let Err(e) = self
            .alerts
            .create(alert_type, message, order_id.to_string())
        {
            tracing::warn!(order_id = %order_id, error = %e, "Failed to write alert, dropping");
        }
    }
}

/// Validate order items: at least one item, positive quantities, prices
/// neither negative nor absurd.
fn validate_items(items: &[OrderItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::Validation(
            "Order must contain at least one item".to_string(),
        ));
    }

    let max_price = Decimal::from(MAX_UNIT_PRICE);
    for item in items {
        if item.quantity <= 0 {
            return Err(AppError::Validation(format!(
                "Item '{}': quantity must be positive, got {}",
                item.name, item.quantity
            )));
        }
        if item.quantity > MAX_QUANTITY {
            return Err(AppError::Validation(format!(
                "Item '{}': quantity exceeds maximum allowed ({MAX_QUANTITY})",
                item.name
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Item '{}': unit price cannot be negative",
                item.name
            )));
        }
        if item.unit_price > max_price {
            return Err(AppError::Validation(format!(
                "Item '{}': unit price exceeds maximum allowed ({MAX_UNIT_PRICE})",
                item.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unread_alerts(store: &KvStore) -> Vec<shared::models::Alert> {
        AlertRepository::new(store.clone()).find_unread().unwrap()
    }

    fn lifecycle() -> (OrderLifecycle, KvStore) {
        let store = KvStore::open_in_memory().unwrap();
        (OrderLifecycle::new(store.clone()), store)
    }

    fn item(name: &str, price: &str, quantity: i32) -> OrderItem {
        OrderItem {
            product_id: format!("product:{name}"),
            name: name.to_string(),
            unit_price: price.parse().unwrap(),
            quantity,
        }
    }

    fn create(table: &str, items: Vec<OrderItem>) -> OrderCreate {
        OrderCreate {
            table_number: table.to_string(),
            waiter: "Carlos".to_string(),
            items,
        }
    }

    #[test]
    fn test_create_computes_subtotal_and_emits_alert() {
        let (lifecycle, store) = lifecycle();

        let order = lifecycle
            .create_order(
                create("3", vec![item("Ajiaco", "22000.00", 2), item("Café", "3000.00", 1)]),
                Some("user-1".to_string()),
            )
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, "47000.00".parse().unwrap());

        let alerts = unread_alerts(&store);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::NewOrder);
        assert_eq!(alerts[0].order_id, order.id);
    }

    #[test]
    fn test_create_rejects_empty_items() {
        let (lifecycle, _) = lifecycle();
        let result = lifecycle.create_order(create("3", vec![]), None);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_non_positive_quantity() {
        let (lifecycle, _) = lifecycle();
        let result = lifecycle.create_order(create("3", vec![item("Café", "3000.00", 0)]), None);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let (lifecycle, _) = lifecycle();
        let result = lifecycle.create_order(create("3", vec![item("Café", "-1.00", 1)]), None);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_ready_transition_emits_alert_once() {
        let (lifecycle, store) = lifecycle();
        let order = lifecycle
            .create_order(create("7", vec![item("Sancocho", "20000.00", 1)]), None)
            .unwrap();

        lifecycle
            .update_status(&order.id, OrderStatus::Preparing, None)
            .unwrap();
        lifecycle
            .update_status(&order.id, OrderStatus::Ready, None)
            .unwrap();
        // Same-state no-op must not duplicate the alert
        lifecycle
            .update_status(&order.id, OrderStatus::Ready, None)
            .unwrap();

        let ready_alerts: Vec<_> = unread_alerts(&store)
            .into_iter()
            .filter(|a| a.alert_type == AlertType::OrderReady)
            .collect();
        assert_eq!(ready_alerts.len(), 1);
        assert_eq!(ready_alerts[0].order_id, order.id);
    }

    #[test]
    fn test_unknown_order_is_not_found() {
        let (lifecycle, _) = lifecycle();
        let result = lifecycle.update_status("order:missing", OrderStatus::Preparing, None);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_illegal_transition_surfaces() {
        let (lifecycle, _) = lifecycle();
        let order = lifecycle
            .create_order(create("1", vec![item("Café", "3000.00", 1)]), None)
            .unwrap();

        let result = lifecycle.update_status(&order.id, OrderStatus::Served, None);
        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[test]
    fn test_list_ready_for_settlement() {
        let (lifecycle, _) = lifecycle();
        let order = lifecycle
            .create_order(create("2", vec![item("Café", "3000.00", 1)]), None)
            .unwrap();
        lifecycle
            .update_status(&order.id, OrderStatus::Preparing, None)
            .unwrap();
        lifecycle
            .update_status(&order.id, OrderStatus::Ready, None)
            .unwrap();

        let other = lifecycle
            .create_order(create("4", vec![item("Café", "3000.00", 2)]), None)
            .unwrap();

        let settleable = lifecycle.list_ready_for_settlement().unwrap();
        assert_eq!(settleable.len(), 1);
        assert_eq!(settleable[0].id, order.id);
        assert_ne!(settleable[0].id, other.id);
    }
}
