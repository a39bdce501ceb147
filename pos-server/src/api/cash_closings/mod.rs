//! Cash closing API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cash-closing", post(handler::generate))
        .route("/api/cash-closings", get(handler::list))
}
