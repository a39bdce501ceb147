//! Configuration API handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::repository::StoreConfigRepository;
use crate::utils::AppResult;
use shared::models::{StoreConfig, StoreConfigUpdate};

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub configuration: StoreConfig,
}

/// GET /api/configuration - current store configuration
pub async fn get_config(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<ConfigResponse>> {
    let configuration = state.store_config()?;
    Ok(Json(ConfigResponse {
        success: true,
        configuration,
    }))
}

/// PUT /api/configuration - update store configuration (admin)
pub async fn update_config(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<StoreConfigUpdate>,
) -> AppResult<Json<ConfigResponse>> {
    user.require_admin()?;

    let configuration =
        StoreConfigRepository::new(state.store.clone()).update(payload, Some(user.id))?;
    Ok(Json(ConfigResponse {
        success: true,
        configuration,
    }))
}
