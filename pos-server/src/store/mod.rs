//! Persistence layer
//!
//! A single redb database holds every entity as a JSON value under a
//! `<kind>:<identifier>` key. Prefix range scans over the key space are
//! the only bulk-read mechanism.

mod kv;

pub use kv::{KvStore, StoreError, StoreResult};
