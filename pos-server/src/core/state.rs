//! Server state
//!
//! One [`KvStore`] handle is the only shared mutable resource; every
//! service view is a cheap clone over it.

use std::path::PathBuf;

use chrono_tz::Tz;

use crate::core::Config;
use crate::orders::OrderLifecycle;
use crate::payments::PaymentProcessor;
use crate::reconciliation::CashReconciliation;
use crate::repository::StoreConfigRepository;
use crate::store::KvStore;
use crate::utils::{AppResult, time};
use shared::models::StoreConfig;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: KvStore,
}

impl ServerState {
    pub fn new(config: Config, store: KvStore) -> Self {
        Self { config, store }
    }

    pub fn initialize(config: &Config) -> Self {
        let db_path = PathBuf::from(&config.work_dir).join("pos.redb");
        let store = KvStore::open(&db_path)
            .unwrap_or_else(|e| panic!("Failed to open database at {}: {e}", db_path.display()));

        Self::new(config.clone(), store)
    }

    /// In-memory state for tests
    pub fn in_memory() -> Self {
        Self::new(Config::default(), KvStore::open_in_memory().unwrap())
    }

    pub fn lifecycle(&self) -> OrderLifecycle {
        OrderLifecycle::new(self.store.clone())
    }

    pub fn payments(&self) -> PaymentProcessor {
        PaymentProcessor::new(self.store.clone())
    }

    pub fn reconciliation(&self) -> CashReconciliation {
        CashReconciliation::new(self.store.clone())
    }

    /// Current store configuration (defaults before bootstrap has run)
    pub fn store_config(&self) -> AppResult<StoreConfig> {
        Ok(StoreConfigRepository::new(self.store.clone()).get()?)
    }

    /// Business timezone from the store configuration
    pub fn business_tz(&self) -> AppResult<Tz> {
        Ok(time::parse_timezone(&self.store_config()?.timezone))
    }
}
