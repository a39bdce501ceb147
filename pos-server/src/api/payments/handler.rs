//! Payments API handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::payments::compute_totals;
use crate::utils::{AppError, AppResult};
use shared::models::{Payment, PaymentCreate};

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub payment: Payment,
}

#[derive(Debug, Serialize)]
pub struct PaymentsResponse {
    pub success: bool,
    pub payments: Vec<Payment>,
}

/// POST /api/payments - settle an order
///
/// The breakdown is recomputed server-side from the order and the
/// configured rates; amounts echoed by the client are validated, never
/// trusted.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<PaymentResponse>> {
    let order = state
        .lifecycle()
        .repository()
        .find_by_id(&payload.order_id)?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", payload.order_id)))?;

    let config = state.store_config()?;
    let totals = compute_totals(&order, payload.tip, config.tax_rate, config.service_rate)?;

    if let Some(subtotal) = payload.subtotal {
        if subtotal != totals.subtotal {
            return Err(AppError::Validation(format!(
                "Displayed subtotal {subtotal} does not match order subtotal {}",
                totals.subtotal
            )));
        }
    }
    if let Some(total) = payload.total {
        if total != totals.total {
            return Err(AppError::Validation(format!(
                "Displayed total {total} does not match computed total {}",
                totals.total
            )));
        }
    }

    let payment = state.payments().process_payment(
        &order,
        payload.payment_method,
        totals,
        payload.received_amount,
        payload.notes,
        Some(user.id),
    )?;

    Ok(Json(PaymentResponse {
        success: true,
        payment,
    }))
}

/// GET /api/payments - list all payments (caller filters by date/method)
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<PaymentsResponse>> {
    let payments = state.payments().list_payments()?;
    Ok(Json(PaymentsResponse {
        success: true,
        payments,
    }))
}
