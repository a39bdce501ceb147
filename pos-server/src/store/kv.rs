//! redb-based key-value store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `records` | `<kind>:<identifier>` | JSON bytes | All persisted entities |
//! | `counters` | name | `u64` | Identifier sequence |
//!
//! Keys are opaque strings; the `<kind>:` prefix convention is what makes
//! range scans group records of one kind. Values are serde-serialized JSON.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns the write is on disk and the file is in a consistent state,
//! which matters for POS terminals that get powered off mid-shift.
//!
//! # Atomicity
//!
//! Each operation runs in its own transaction, so writes are atomic per
//! key. redb serializes write transactions, which makes [`KvStore::update`]
//! an atomic read-modify-write. That is the arbitration point the
//! payment race hardening builds on. No cross-key transaction is exposed.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// All entity records: key = `<kind>:<identifier>`, value = JSON bytes
const RECORDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

/// Monotonic counters: key = counter name, value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const SEQUENCE_KEY: &str = "record_seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store backed by redb
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Database>,
}

impl KvStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
            let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
            if counters.get(SEQUENCE_KEY)?.is_none() {
                counters.insert(SEQUENCE_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a value by key
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;

        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Set a value, replacing any previous value under the key
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            table.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Delete a key; returns whether it existed
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            let existed = table.remove(key)?.is_some();
            existed
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Get all values whose key starts with `prefix` (order unspecified)
    pub fn get_by_prefix<T: DeserializeOwned>(&self, prefix: &str) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;

        let mut values = Vec::new();
        for result in table.range(prefix..)? {
            let (key, value) = result?;
            if !key.value().starts_with(prefix) {
                break;
            }
            values.push(serde_json::from_slice(value.value())?);
        }
        Ok(values)
    }

    /// Atomic read-modify-write on a single key.
    ///
    /// `mutate` receives the current value (if any) and returns the value
    /// to persist, or an error to abort. An aborted transaction leaves
    /// the stored value untouched. Write transactions are exclusive, so
    /// two concurrent updates of the same key cannot interleave.
    pub fn update<T, E, F>(&self, key: &str, mutate: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
        F: FnOnce(Option<T>) -> Result<T, E>,
    {
        let write_txn = self.db.begin_write().map_err(StoreError::from)?;
        let updated = {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .map_err(StoreError::from)?;

            let current = match table.get(key).map_err(StoreError::from)? {
                Some(value) => Some(
                    serde_json::from_slice(value.value())
                        .map_err(StoreError::from)?,
                ),
                None => None,
            };

            let updated = mutate(current)?;
            let bytes = serde_json::to_vec(&updated).map_err(StoreError::from)?;
            table
                .insert(key, bytes.as_slice())
                .map_err(StoreError::from)?;
            updated
        };
        write_txn.commit().map_err(StoreError::from)?;
        Ok(updated)
    }

    /// Increment and return the identifier sequence counter
    pub fn next_sequence(&self) -> StoreResult<u64> {
        let write_txn = self.db.begin_write()?;
        let next = {
            let mut table = write_txn.open_table(COUNTERS_TABLE)?;
            let current = table.get(SEQUENCE_KEY)?.map(|g| g.value()).unwrap_or(0);
            let next = current + 1;
            table.insert(SEQUENCE_KEY, next)?;
            next
        };
        write_txn.commit()?;
        Ok(next)
    }
}
