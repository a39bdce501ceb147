//! HTTP API
//!
//! One module per entity, each with a `router()` and its handlers.
//! Success bodies are `{ "success": true, ... }`; failures map through
//! [`crate::utils::AppError`] to `{ "error": "..." }` with the matching
//! status code.

pub mod alerts;
pub mod cash_closings;
pub mod configuration;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod tables;
pub mod users;

use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(cash_closings::router())
        .merge(alerts::router())
        .merge(tables::router())
        .merge(products::router())
        .merge(configuration::router())
        .merge(users::router())
}
