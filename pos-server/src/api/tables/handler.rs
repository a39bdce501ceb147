//! Tables API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::repository::DiningTableRepository;
use crate::utils::AppResult;
use shared::models::{DiningTable, DiningTableUpdate};

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub success: bool,
    pub table: DiningTable,
}

#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub success: bool,
    pub tables: Vec<DiningTable>,
}

/// GET /api/tables - list all tables
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<TablesResponse>> {
    let tables = DiningTableRepository::new(state.store.clone()).find_all()?;
    Ok(Json(TablesResponse {
        success: true,
        tables,
    }))
}

/// PUT /api/tables/{id} - update status/waiter/capacity
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<TableResponse>> {
    let table =
        DiningTableRepository::new(state.store.clone()).update(&id, payload, Some(user.id))?;
    Ok(Json(TableResponse {
        success: true,
        table,
    }))
}
