//! Alert Repository

use super::{RepoError, RepoResult, new_record_id};
use crate::store::KvStore;
use shared::models::{Alert, AlertType};

const KIND: &str = "alert";
const PREFIX: &str = "alert:";

#[derive(Clone)]
pub struct AlertRepository {
    store: KvStore,
}

impl AlertRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn create(
        &self,
        alert_type: AlertType,
        message: String,
        order_id: String,
    ) -> RepoResult<Alert> {
        let id = new_record_id(&self.store, KIND)?;
        let alert = Alert {
            id: id.clone(),
            alert_type,
            message,
            order_id,
            read: false,
            created_at: shared::util::now_millis(),
        };
        self.store.set(&id, &alert)?;
        Ok(alert)
    }

    pub fn find_unread(&self) -> RepoResult<Vec<Alert>> {
        let alerts: Vec<Alert> = self.store.get_by_prefix(PREFIX)?;
        Ok(alerts.into_iter().filter(|a| !a.read).collect())
    }

    /// Acknowledge an alert. The only mutation alerts support.
    pub fn mark_read(&self, id: &str) -> RepoResult<Alert> {
        self.store.update(id, |current: Option<Alert>| {
            let mut alert =
                current.ok_or_else(|| RepoError::NotFound(format!("Alert {id} not found")))?;
            alert.read = true;
            Ok(alert)
        })
    }
}
