//! POS Server - restaurant point-of-sale backend
//!
//! # Architecture
//!
//! The financial core (orders, payments, reconciliation) sits on a
//! prefix-indexed key-value store; everything else is boundary glue.
//!
//! ```text
//! pos-server/src/
//! ├── core/            # Config, ServerState, HTTP server
//! ├── store/           # redb key-value store (get/set/delete/prefix scan)
//! ├── repository/      # Typed per-entity access, stamps, version guards
//! ├── orders/          # Order lifecycle state machine + alerts
//! ├── payments/        # Totals computation and settlement
//! ├── reconciliation/  # Daily cash reconciliation
//! ├── api/             # HTTP routes and handlers
//! ├── auth/            # Identity extracted at the boundary
//! └── utils/           # Errors, time helpers, logging
//! ```

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod core;
pub mod orders;
pub mod payments;
pub mod reconciliation;
pub mod repository;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use orders::OrderLifecycle;
pub use payments::PaymentProcessor;
pub use reconciliation::CashReconciliation;
pub use store::{KvStore, StoreError};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Ensure the working directory exists before the store opens in it
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.work_dir)
}
