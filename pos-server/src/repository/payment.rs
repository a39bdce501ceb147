//! Payment Repository
//!
//! Payments are append-only: there is no update path, by design.

use super::{RepoResult, new_record_id};
use crate::store::KvStore;
use shared::models::Payment;

const KIND: &str = "payment";
const PREFIX: &str = "payment:";

#[derive(Clone)]
pub struct PaymentRepository {
    store: KvStore,
}

impl PaymentRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Persist a new payment, assigning id and creation stamp
    pub fn create(&self, mut payment: Payment) -> RepoResult<Payment> {
        payment.id = new_record_id(&self.store, KIND)?;
        payment.created_at = shared::util::now_millis();
        self.store.set(&payment.id, &payment)?;
        Ok(payment)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        Ok(self.store.get(id)?)
    }

    pub fn find_all(&self) -> RepoResult<Vec<Payment>> {
        Ok(self.store.get_by_prefix(PREFIX)?)
    }
}
