//! Shared types for the POS backend
//!
//! Entity models and payload types used by the server and (via the JSON
//! API) by the frontend clients.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
