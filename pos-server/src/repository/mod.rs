//! Repository Module
//!
//! Typed access over the key-value store, one module per entity kind.
//! Repositories own key construction (`<kind>:<identifier>`), identifier
//! generation, created/updated stamping, and the per-record guards that
//! must hold under concurrent writers (status transitions, version
//! checks). Orchestration across entities lives in the service modules.

// Financial core
pub mod cash_closing;
pub mod order;
pub mod payment;

// Notifications
pub mod alert;

// Reference data
pub mod dining_table;
pub mod product;
pub mod store_config;
pub mod user_profile;

// Re-exports
pub use alert::AlertRepository;
pub use cash_closing::CashClosingRepository;
pub use dining_table::DiningTableRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;
pub use store_config::StoreConfigRepository;
pub use user_profile::UserProfileRepository;

use crate::store::{KvStore, StoreError};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Already paid: {0}")]
    AlreadyPaid(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "<kind>:<identifier>" across the whole stack
// =============================================================================
//
// The full key doubles as the record id (the only index is the key space,
// so handing clients the key makes every id directly addressable).
// Identifier layout keeps lexicographic order chronological:
//   - 13 digits: zero-padded Unix millis
//   - 6 digits: zero-padded store sequence (unique under same-ms writes)

/// Generate a fresh record id for the given kind
pub fn new_record_id(store: &KvStore, kind: &str) -> RepoResult<String> {
    let seq = store.next_sequence()?;
    Ok(format!(
        "{kind}:{:013}-{:06}",
        shared::util::now_millis(),
        seq
    ))
}
