//! Cash Closing Repository
//!
//! Closings are immutable snapshots: create and read only.

use super::{RepoResult, new_record_id};
use crate::store::KvStore;
use shared::models::CashClosing;

const KIND: &str = "cash_closing";
const PREFIX: &str = "cash_closing:";

#[derive(Clone)]
pub struct CashClosingRepository {
    store: KvStore,
}

impl CashClosingRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Persist a closing snapshot, assigning id and creation stamp
    pub fn create(&self, mut closing: CashClosing) -> RepoResult<CashClosing> {
        closing.id = new_record_id(&self.store, KIND)?;
        closing.created_at = shared::util::now_millis();
        self.store.set(&closing.id, &closing)?;
        Ok(closing)
    }

    pub fn find_all(&self) -> RepoResult<Vec<CashClosing>> {
        Ok(self.store.get_by_prefix(PREFIX)?)
    }
}
