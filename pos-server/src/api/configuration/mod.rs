//! Configuration API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/configuration",
        get(handler::get_config).put(handler::update_config),
    )
}
