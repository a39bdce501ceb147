//! Money helpers
//!
//! All monetary arithmetic stays in `rust_decimal::Decimal`; binary
//! floating point never touches an amount. Rounding is 2 decimal places,
//! half-up (`MidpointAwayFromZero`), applied to each computed component.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a computed amount to currency precision
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// A zero amount at currency precision
pub fn zero() -> Decimal {
    Decimal::new(0, DECIMAL_PLACES)
}
