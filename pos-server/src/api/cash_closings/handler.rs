//! Cash closing API handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{CashClosing, CashClosingCreate};

#[derive(Debug, Serialize)]
pub struct ClosingResponse {
    pub success: bool,
    pub report: CashClosing,
}

#[derive(Debug, Serialize)]
pub struct ClosingsResponse {
    pub success: bool,
    pub closings: Vec<CashClosing>,
}

/// POST /api/cash-closing - generate a closing report
pub async fn generate(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CashClosingCreate>,
) -> AppResult<Json<ClosingResponse>> {
    let tz = state.business_tz()?;
    let report = state
        .reconciliation()
        .generate_closing(payload, tz, Some(user.id))?;
    Ok(Json(ClosingResponse {
        success: true,
        report,
    }))
}

/// GET /api/cash-closings - list closing reports
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<ClosingsResponse>> {
    let closings = state.reconciliation().list_closings()?;
    Ok(Json(ClosingsResponse {
        success: true,
        closings,
    }))
}
