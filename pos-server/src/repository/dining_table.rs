//! Dining Table Repository

use super::{RepoError, RepoResult};
use crate::store::KvStore;
use shared::models::{DiningTable, DiningTableUpdate, TableStatus};

const PREFIX: &str = "table:";

#[derive(Clone)]
pub struct DiningTableRepository {
    store: KvStore,
}

impl DiningTableRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Insert a table under a fixed number-derived key (bootstrap seeding)
    pub fn insert(&self, number: &str, capacity: i32) -> RepoResult<DiningTable> {
        let id = format!("table:{number}");
        let table = DiningTable {
            id: id.clone(),
            number: number.to_string(),
            capacity,
            status: TableStatus::Available,
            waiter: None,
            created_at: shared::util::now_millis(),
            updated_at: None,
            updated_by: None,
        };
        self.store.set(&id, &table)?;
        Ok(table)
    }

    pub fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        Ok(self.store.get_by_prefix(PREFIX)?)
    }

    pub fn update(
        &self,
        id: &str,
        data: DiningTableUpdate,
        updated_by: Option<String>,
    ) -> RepoResult<DiningTable> {
        self.store.update(id, |current: Option<DiningTable>| {
            let mut table =
                current.ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))?;

            if let Some(status) = data.status {
                table.status = status;
            }
            if let Some(waiter) = data.waiter {
                table.waiter = waiter;
            }
            if let Some(capacity) = data.capacity {
                table.capacity = capacity;
            }
            table.updated_at = Some(shared::util::now_millis());
            table.updated_by = updated_by;
            Ok(table)
        })
    }
}
