//! Orders API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Order, OrderCreate, OrderUpdate};

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

/// POST /api/orders - create an order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.lifecycle().create_order(payload, Some(user.id))?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// GET /api/orders - list all orders
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<OrdersResponse>> {
    let orders = state.lifecycle().repository().find_all()?;
    Ok(Json(OrdersResponse {
        success: true,
        orders,
    }))
}

/// GET /api/orders/settlement - orders a cashier may settle
pub async fn settlement(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<OrdersResponse>> {
    let orders = state.lifecycle().list_ready_for_settlement()?;
    Ok(Json(OrdersResponse {
        success: true,
        orders,
    }))
}

/// PUT /api/orders/{id} - update status/waiter/items
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.lifecycle().update_order(&id, payload, Some(user.id))?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}
