//! Store Configuration Repository
//!
//! Singleton record under `config:system`; reads fall back to defaults
//! so the server is usable before the bootstrap has run.

use super::RepoResult;
use crate::store::KvStore;
use shared::models::{StoreConfig, StoreConfigUpdate};

const KEY: &str = "config:system";

#[derive(Clone)]
pub struct StoreConfigRepository {
    store: KvStore,
}

impl StoreConfigRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> RepoResult<StoreConfig> {
        Ok(self.store.get(KEY)?.unwrap_or_default())
    }

    pub fn exists(&self) -> RepoResult<bool> {
        Ok(self.store.get::<StoreConfig>(KEY)?.is_some())
    }

    pub fn put(&self, config: &StoreConfig) -> RepoResult<()> {
        Ok(self.store.set(KEY, config)?)
    }

    pub fn update(
        &self,
        data: StoreConfigUpdate,
        updated_by: Option<String>,
    ) -> RepoResult<StoreConfig> {
        self.store.update(KEY, |current: Option<StoreConfig>| {
            let mut config = current.unwrap_or_default();

            if let Some(restaurant_name) = data.restaurant_name {
                config.restaurant_name = restaurant_name;
            }
            if let Some(address) = data.address {
                config.address = address;
            }
            if let Some(phone) = data.phone {
                config.phone = phone;
            }
            if let Some(email) = data.email {
                config.email = email;
            }
            if let Some(tax_rate) = data.tax_rate {
                config.tax_rate = tax_rate;
            }
            if let Some(service_rate) = data.service_rate {
                config.service_rate = service_rate;
            }
            if let Some(currency) = data.currency {
                config.currency = currency;
            }
            if let Some(timezone) = data.timezone {
                config.timezone = timezone;
            }
            config.updated_at = Some(shared::util::now_millis());
            config.updated_by = updated_by;
            Ok::<_, super::RepoError>(config)
        })
    }
}
