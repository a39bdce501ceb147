//! Users & profile API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/profile",
            get(handler::get_profile).put(handler::update_profile),
        )
        .route("/api/users", get(handler::list_users))
        .route("/api/users/{id}", put(handler::update_user))
}
