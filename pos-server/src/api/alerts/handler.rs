//! Alerts API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::repository::AlertRepository;
use crate::utils::AppResult;
use shared::models::Alert;

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub success: bool,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// GET /api/alerts - unread alerts only
pub async fn list_unread(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<AlertsResponse>> {
    let alerts = AlertRepository::new(state.store.clone()).find_unread()?;
    Ok(Json(AlertsResponse {
        success: true,
        alerts,
    }))
}

/// PUT /api/alerts/{id}/read - acknowledge an alert
pub async fn mark_read(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AckResponse>> {
    AlertRepository::new(state.store.clone()).mark_read(&id)?;
    Ok(Json(AckResponse { success: true }))
}
