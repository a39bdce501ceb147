//! Order Repository
//!
//! All mutations run inside [`KvStore::update`], so the status and
//! version guards cannot interleave with a concurrent writer.

use super::{RepoError, RepoResult, new_record_id};
use crate::store::KvStore;
use shared::models::{Order, OrderCreate, OrderStatus, OrderUpdate, subtotal_of};

const KIND: &str = "order";
const PREFIX: &str = "order:";

#[derive(Clone)]
pub struct OrderRepository {
    store: KvStore,
}

impl OrderRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn create(&self, data: OrderCreate, created_by: Option<String>) -> RepoResult<Order> {
        let id = new_record_id(&self.store, KIND)?;
        let order = Order {
            id: id.clone(),
            table_number: data.table_number,
            waiter: data.waiter,
            subtotal: subtotal_of(&data.items),
            items: data.items,
            status: OrderStatus::Pending,
            version: 0,
            paid_at: None,
            created_at: shared::util::now_millis(),
            created_by,
            updated_at: None,
            updated_by: None,
        };
        self.store.set(&id, &order)?;
        Ok(order)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        Ok(self.store.get(id)?)
    }

    pub fn find_all(&self) -> RepoResult<Vec<Order>> {
        Ok(self.store.get_by_prefix(PREFIX)?)
    }

    /// Orders a cashier may select for settlement (ready or served)
    pub fn find_settleable(&self) -> RepoResult<Vec<Order>> {
        let orders = self.find_all()?;
        Ok(orders
            .into_iter()
            .filter(|o| o.status.is_settleable())
            .collect())
    }

    /// Apply a status transition.
    ///
    /// Same-state transitions are a no-op; anything other than one forward
    /// step or a cancel of a non-terminal order is rejected. The `paid`
    /// state is owned by payment processing and cannot be entered here.
    pub fn transition_status(
        &self,
        id: &str,
        target: OrderStatus,
        updated_by: Option<String>,
    ) -> RepoResult<Order> {
        self.store.update(id, |current: Option<Order>| {
            let mut order =
                current.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

            if order.status == target {
                return Ok(order);
            }
            if target == OrderStatus::Paid {
                return Err(RepoError::InvalidTransition(format!(
                    "Order {id}: paid is only reachable through payment processing"
                )));
            }
            if !order.status.can_transition_to(target) {
                return Err(RepoError::InvalidTransition(format!(
                    "Order {id}: {:?} -> {:?} is not allowed",
                    order.status, target
                )));
            }

            order.status = target;
            order.version += 1;
            order.updated_at = Some(shared::util::now_millis());
            order.updated_by = updated_by;
            Ok(order)
        })
    }

    /// Patch waiter/items (and optionally status) on an open order.
    ///
    /// The original id is always preserved; item changes recompute the
    /// derived subtotal. With `expected_version` set, a concurrent writer
    /// surfaces as `Conflict` instead of a silent lost update.
    pub fn update(
        &self,
        id: &str,
        data: OrderUpdate,
        updated_by: Option<String>,
    ) -> RepoResult<Order> {
        self.store.update(id, |current: Option<Order>| {
            let mut order =
                current.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

            if let Some(expected) = data.expected_version {
                if order.version != expected {
                    return Err(RepoError::Conflict(format!(
                        "Order {id} was modified concurrently (version {} != expected {expected})",
                        order.version
                    )));
                }
            }

            if let Some(target) = data.status {
                if target != order.status {
                    if target == OrderStatus::Paid {
                        return Err(RepoError::InvalidTransition(format!(
                            "Order {id}: paid is only reachable through payment processing"
                        )));
                    }
                    if !order.status.can_transition_to(target) {
                        return Err(RepoError::InvalidTransition(format!(
                            "Order {id}: {:?} -> {:?} is not allowed",
                            order.status, target
                        )));
                    }
                    order.status = target;
                }
            }

            if data.waiter.is_some() || data.items.is_some() {
                if order.status.is_terminal() {
                    return Err(RepoError::InvalidTransition(format!(
                        "Order {id} is {:?} and can no longer change",
                        order.status
                    )));
                }
                if let Some(waiter) = data.waiter {
                    order.waiter = waiter;
                }
                if let Some(items) = data.items {
                    order.subtotal = subtotal_of(&items);
                    order.items = items;
                }
            }

            order.version += 1;
            order.updated_at = Some(shared::util::now_millis());
            order.updated_by = updated_by;
            Ok(order)
        })
    }

    /// Atomically claim the order for settlement: flip it to `paid` and
    /// stamp `paid_at`. Exactly one of two racing callers wins; the loser
    /// sees `AlreadyPaid` (claim already committed) or `Conflict` (the
    /// order changed since it was read).
    pub fn claim_paid(
        &self,
        id: &str,
        expected_version: u64,
        updated_by: Option<String>,
    ) -> RepoResult<Order> {
        self.store.update(id, |current: Option<Order>| {
            let mut order =
                current.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

            if order.status == OrderStatus::Paid {
                return Err(RepoError::AlreadyPaid(format!(
                    "Order {id} has already been paid"
                )));
            }
            if order.version != expected_version {
                return Err(RepoError::Conflict(format!(
                    "Order {id} was modified concurrently (version {} != expected {expected_version})",
                    order.version
                )));
            }
            if !order.status.is_settleable() {
                return Err(RepoError::InvalidTransition(format!(
                    "Order {id} is {:?} and not ready for settlement",
                    order.status
                )));
            }

            let now = shared::util::now_millis();
            order.status = OrderStatus::Paid;
            order.paid_at = Some(now);
            order.version += 1;
            order.updated_at = Some(now);
            order.updated_by = updated_by;
            Ok(order)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::OrderItem;

    fn repo() -> OrderRepository {
        OrderRepository::new(KvStore::open_in_memory().unwrap())
    }

    fn sample_create() -> OrderCreate {
        OrderCreate {
            table_number: "5".to_string(),
            waiter: "Carlos".to_string(),
            items: vec![OrderItem {
                product_id: "product:1".to_string(),
                name: "Bandeja Paisa".to_string(),
                unit_price: Decimal::new(2800, 2),
                quantity: 2,
            }],
        }
    }

    fn advance(repo: &OrderRepository, id: &str, to: &[OrderStatus]) -> Order {
        let mut order = repo.find_by_id(id).unwrap().unwrap();
        for status in to {
            order = repo.transition_status(id, *status, None).unwrap();
        }
        order
    }

    #[test]
    fn test_create_stamps_and_subtotal() {
        let repo = repo();
        let order = repo.create(sample_create(), Some("user-1".to_string())).unwrap();

        assert!(order.id.starts_with("order:"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, Decimal::new(5600, 2));
        assert_eq!(order.version, 0);
        assert!(order.created_at > 0);
        assert!(order.paid_at.is_none());
    }

    #[test]
    fn test_forward_transitions() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();

        let order = repo
            .transition_status(&order.id, OrderStatus::Preparing, None)
            .unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.version, 1);

        let order = repo
            .transition_status(&order.id, OrderStatus::Ready, None)
            .unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
    }

    #[test]
    fn test_skipping_a_step_is_rejected() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();

        let result = repo.transition_status(&order.id, OrderStatus::Ready, None);
        assert!(matches!(result, Err(RepoError::InvalidTransition(_))));
    }

    #[test]
    fn test_backward_transition_is_rejected() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();
        advance(&repo, &order.id, &[OrderStatus::Preparing, OrderStatus::Ready]);

        let result = repo.transition_status(&order.id, OrderStatus::Preparing, None);
        assert!(matches!(result, Err(RepoError::InvalidTransition(_))));
    }

    #[test]
    fn test_same_state_is_noop() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();

        let unchanged = repo
            .transition_status(&order.id, OrderStatus::Pending, None)
            .unwrap();
        assert_eq!(unchanged.version, 0);
        assert!(unchanged.updated_at.is_none());
    }

    #[test]
    fn test_cancel_from_any_open_state() {
        let repo = repo();
        for steps in [
            vec![],
            vec![OrderStatus::Preparing],
            vec![OrderStatus::Preparing, OrderStatus::Ready],
            vec![
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Served,
            ],
        ] {
            let order = repo.create(sample_create(), None).unwrap();
            advance(&repo, &order.id, &steps);
            let cancelled = repo
                .transition_status(&order.id, OrderStatus::Cancelled, None)
                .unwrap();
            assert_eq!(cancelled.status, OrderStatus::Cancelled);
        }
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();
        repo.transition_status(&order.id, OrderStatus::Cancelled, None)
            .unwrap();

        let result = repo.transition_status(&order.id, OrderStatus::Preparing, None);
        assert!(matches!(result, Err(RepoError::InvalidTransition(_))));
    }

    #[test]
    fn test_paid_not_reachable_via_transition() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();
        advance(
            &repo,
            &order.id,
            &[
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Served,
            ],
        );

        let result = repo.transition_status(&order.id, OrderStatus::Paid, None);
        assert!(matches!(result, Err(RepoError::InvalidTransition(_))));
    }

    #[test]
    fn test_update_preserves_id_and_recomputes_subtotal() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();

        let update = OrderUpdate {
            status: None,
            waiter: Some("María".to_string()),
            items: Some(vec![OrderItem {
                product_id: "product:6".to_string(),
                name: "Café".to_string(),
                unit_price: Decimal::new(300, 2),
                quantity: 3,
            }]),
            expected_version: Some(0),
        };
        let updated = repo.update(&order.id, update, Some("user-2".to_string())).unwrap();

        assert_eq!(updated.id, order.id);
        assert_eq!(updated.waiter, "María");
        assert_eq!(updated.subtotal, Decimal::new(900, 2));
        assert_eq!(updated.version, 1);
        assert_eq!(updated.updated_by.as_deref(), Some("user-2"));
    }

    #[test]
    fn test_update_version_mismatch_is_conflict() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();
        repo.transition_status(&order.id, OrderStatus::Preparing, None)
            .unwrap();

        let update = OrderUpdate {
            status: None,
            waiter: Some("María".to_string()),
            items: None,
            expected_version: Some(0), // stale read
        };
        let result = repo.update(&order.id, update, None);
        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    #[test]
    fn test_update_missing_order_is_not_found() {
        let repo = repo();
        let update = OrderUpdate {
            status: Some(OrderStatus::Preparing),
            waiter: None,
            items: None,
            expected_version: None,
        };
        let result = repo.update("order:missing", update, None);
        assert!(matches!(result, Err(RepoError::NotFound(_))));
    }

    #[test]
    fn test_claim_paid_happy_path() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();
        let order = advance(&repo, &order.id, &[OrderStatus::Preparing, OrderStatus::Ready]);

        let paid = repo.claim_paid(&order.id, order.version, None).unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);
        assert!(paid.paid_at.is_some());
    }

    #[test]
    fn test_claim_paid_twice_second_loses() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();
        let order = advance(&repo, &order.id, &[OrderStatus::Preparing, OrderStatus::Ready]);

        // Both callers read version 2, first claim wins
        repo.claim_paid(&order.id, order.version, None).unwrap();
        let second = repo.claim_paid(&order.id, order.version, None);
        assert!(matches!(second, Err(RepoError::AlreadyPaid(_))));
    }

    #[test]
    fn test_claim_paid_stale_version_is_conflict() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();
        advance(&repo, &order.id, &[OrderStatus::Preparing, OrderStatus::Ready]);

        // Caller read before the two transitions happened
        let result = repo.claim_paid(&order.id, 0, None);
        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    #[test]
    fn test_claim_paid_requires_settleable_state() {
        let repo = repo();
        let order = repo.create(sample_create(), None).unwrap();

        let result = repo.claim_paid(&order.id, 0, None);
        assert!(matches!(result, Err(RepoError::InvalidTransition(_))));
    }

    #[test]
    fn test_find_settleable() {
        let repo = repo();
        let pending = repo.create(sample_create(), None).unwrap();
        let ready = repo.create(sample_create(), None).unwrap();
        advance(&repo, &ready.id, &[OrderStatus::Preparing, OrderStatus::Ready]);
        let served = repo.create(sample_create(), None).unwrap();
        advance(
            &repo,
            &served.id,
            &[
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Served,
            ],
        );

        let settleable = repo.find_settleable().unwrap();
        let ids: Vec<&str> = settleable.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(settleable.len(), 2);
        assert!(ids.contains(&ready.id.as_str()));
        assert!(ids.contains(&served.id.as_str()));
        assert!(!ids.contains(&pending.id.as_str()));
    }
}
