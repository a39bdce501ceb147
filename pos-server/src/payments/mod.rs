//! Payment processing
//!
//! Computes the amount due for an order and records the settlement.
//! The duplicate-payment race is closed by claiming the order first: a
//! versioned atomic update flips it to `paid`, so of two concurrent
//! callers exactly one wins and the other gets `AlreadyPaid`/`Conflict`.

pub mod money;

use rust_decimal::Decimal;

use crate::repository::{OrderRepository, PaymentRepository};
use crate::store::KvStore;
use crate::utils::{AppError, AppResult};
use self::money::{round_money, zero};
use shared::models::{Order, Payment, PaymentMethod, PaymentStatus, PaymentTotals};

#[derive(Clone)]
pub struct PaymentProcessor {
    orders: OrderRepository,
    payments: PaymentRepository,
}

/// Compute the amount due for an order.
///
/// Canonical formula: service and tip are not taxed, tax applies to the
/// subtotal only, and each computed component is rounded half-up to cents.
///
///   service = round2(subtotal × service_rate)
///   tax     = round2(subtotal × tax_rate)
///   total   = subtotal + tax + service + tip
pub fn compute_totals(
    order: &Order,
    tip: Decimal,
    tax_rate: Decimal,
    service_rate: Decimal,
) -> AppResult<PaymentTotals> {
    if tip < Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "Tip cannot be negative: {tip}"
        )));
    }
    if tax_rate < Decimal::ZERO || service_rate < Decimal::ZERO {
        return Err(AppError::Validation(
            "Tax and service rates cannot be negative".to_string(),
        ));
    }

    let subtotal = order.subtotal;
    let service_charge = round_money(subtotal * service_rate);
    let tax = round_money(subtotal * tax_rate);
    let tip = round_money(tip);
    let total = subtotal + tax + service_charge + tip;

    Ok(PaymentTotals {
        subtotal,
        tax,
        service_charge,
        tip,
        total,
    })
}

impl PaymentProcessor {
    pub fn new(store: KvStore) -> Self {
        Self {
            orders: OrderRepository::new(store.clone()),
            payments: PaymentRepository::new(store),
        }
    }

    /// Record a settlement against an order.
    ///
    /// Fails `Validation` for an insufficient or missing cash tender,
    /// `AlreadyPaid` for a second settlement attempt, `Conflict` when a
    /// concurrent writer raced the claim. On success the order is `paid`
    /// (with `paid_at` stamped) and the returned Payment is persisted and
    /// immutable.
    pub fn process_payment(
        &self,
        order: &Order,
        method: PaymentMethod,
        totals: PaymentTotals,
        received: Option<Decimal>,
        notes: Option<String>,
        created_by: Option<String>,
    ) -> AppResult<Payment> {
        let (received_amount, change) = match method {
            PaymentMethod::Cash => {
                let received = received.ok_or_else(|| {
                    AppError::Validation(
                        "Cash payment requires the received amount".to_string(),
                    )
                })?;
                if received < totals.total {
                    return Err(AppError::Validation(format!(
                        "Received amount {received} is less than total {}",
                        totals.total
                    )));
                }
                (received, round_money(received - totals.total))
            }
            _ => (totals.total, zero()),
        };

        // Claim first: flips the order to paid, one winner only. A failed
        // Payment write after this point leaves a visible paid-order/
        // no-payment inconsistency for the repair path rather than a
        // double charge.
        let claimed = self
            .orders
            .claim_paid(&order.id, order.version, created_by.clone())?;

        let payment = self.payments.create(Payment {
            id: String::new(),
            order_id: claimed.id,
            table_number: claimed.table_number,
            payment_method: method,
            subtotal: totals.subtotal,
            tax: totals.tax,
            service_charge: totals.service_charge,
            tip: totals.tip,
            total: totals.total,
            received_amount,
            change,
            status: PaymentStatus::Completed,
            notes,
            created_at: 0,
            created_by,
        })?;

        tracing::info!(
            order_id = %payment.order_id,
            payment_id = %payment.id,
            method = method.as_str(),
            total = %payment.total,
            "Payment recorded"
        );
        Ok(payment)
    }

    pub fn list_payments(&self) -> AppResult<Vec<Payment>> {
        Ok(self.payments.find_all()?)
    }
}
