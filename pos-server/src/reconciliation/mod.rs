//! Cash reconciliation
//!
//! Aggregates a day's payments by method, compares the operator's cash
//! count against the expected cash total, and persists the closing
//! report. Day boundaries are calendar days in the business timezone,
//! so payments at 23:50 and 00:10 local time belong to different closings.
//!
//! A closing is a frozen snapshot of what had been recorded at the moment
//! of generation; backdated payments appear only in later closings.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::repository::{CashClosingRepository, PaymentRepository};
use crate::store::KvStore;
use crate::utils::{AppError, AppResult, time};
use shared::models::{
    CashClosing, CashClosingCreate, MethodSummary, Payment, PaymentMethod, PaymentSummary,
};

const METHODS: [PaymentMethod; 5] = [
    PaymentMethod::Cash,
    PaymentMethod::Card,
    PaymentMethod::Transfer,
    PaymentMethod::Mixed,
    PaymentMethod::Qr,
];

#[derive(Clone)]
pub struct CashReconciliation {
    payments: PaymentRepository,
    closings: CashClosingRepository,
}

/// Group payments by method: per-method count and sum, plus a grand total
/// that always equals the sum of the per-method sums.
pub fn summarize_by_method(payments: &[Payment]) -> PaymentSummary {
    let mut methods = Vec::new();
    let mut grand_total = Decimal::ZERO;

    for method in METHODS {
        let matching: Vec<&Payment> = payments
            .iter()
            .filter(|p| p.payment_method == method)
            .collect();
        if matching.is_empty() {
            continue;
        }
        let sum: Decimal = matching.iter().map(|p| p.total).sum();
        grand_total += sum;
        methods.push(MethodSummary {
            method,
            count: matching.len() as u32,
            sum,
        });
    }

    PaymentSummary {
        methods,
        grand_total,
        transactions: payments.len() as u32,
    }
}

impl CashReconciliation {
    pub fn new(store: KvStore) -> Self {
        Self {
            payments: PaymentRepository::new(store.clone()),
            closings: CashClosingRepository::new(store),
        }
    }

    /// All payments whose `created_at` falls on `date` in the business
    /// timezone. The store scan is unordered; filtering happens here.
    pub fn daily_payments(&self, date: NaiveDate, tz: Tz) -> AppResult<Vec<Payment>> {
        let start = time::day_start_millis(date, tz);
        let end = time::day_end_millis(date, tz);

        let payments = self.payments.find_all()?;
        Ok(payments
            .into_iter()
            .filter(|p| p.created_at >= start && p.created_at < end)
            .collect())
    }

    /// Generate and persist a closing report for `date` (defaults to today
    /// in the business timezone).
    pub fn generate_closing(
        &self,
        data: CashClosingCreate,
        tz: Tz,
        closed_by: Option<String>,
    ) -> AppResult<CashClosing> {
        if data.cash_count < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Cash count cannot be negative: {}",
                data.cash_count
            )));
        }

        let date = match &data.date {
            Some(date) => time::parse_date(date)?,
            None => time::today_in(tz),
        };

        let daily = self.daily_payments(date, tz)?;
        let summary = summarize_by_method(&daily);

        let sum_for = |method: PaymentMethod| -> Decimal {
            summary
                .methods
                .iter()
                .find(|m| m.method == method)
                .map(|m| m.sum)
                .unwrap_or(Decimal::ZERO)
        };

        let expected_cash = sum_for(PaymentMethod::Cash);
        // Signed on purpose: negative means a shortfall. Only a display
        // layer may take the absolute value.
        let difference = data.cash_count - expected_cash;

        let closing = self.closings.create(CashClosing {
            id: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            cash_count_entered: data.cash_count,
            expected_cash,
            difference,
            total_sales: summary.grand_total,
            total_cash: expected_cash,
            total_card: sum_for(PaymentMethod::Card),
            total_transactions: summary.transactions,
            notes: data.notes,
            closed_by,
            created_at: 0,
        })?;

        tracing::info!(
            closing_id = %closing.id,
            date = %closing.date,
            expected = %closing.expected_cash,
            counted = %closing.cash_count_entered,
            difference = %closing.difference,
            "Cash closing generated"
        );
        Ok(closing)
    }

    pub fn list_closings(&self) -> AppResult<Vec<CashClosing>> {
        Ok(self.closings.find_all()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::PaymentStatus;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tz() -> Tz {
        time::parse_timezone("America/Bogota")
    }

    /// Millis for a local Bogota wall-clock time
    fn local_millis(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> i64 {
        tz().with_ymd_and_hms(y, m, d, hh, mm, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn seed_payment(store: &KvStore, id: &str, method: PaymentMethod, total: &str, at: i64) {
        let payment = Payment {
            id: format!("payment:{id}"),
            order_id: format!("order:{id}"),
            table_number: "1".to_string(),
            payment_method: method,
            subtotal: dec(total),
            tax: Decimal::ZERO,
            service_charge: Decimal::ZERO,
            tip: Decimal::ZERO,
            total: dec(total),
            received_amount: dec(total),
            change: Decimal::ZERO,
            status: PaymentStatus::Completed,
            notes: None,
            created_at: at,
            created_by: None,
        };
        store.set(&payment.id, &payment).unwrap();
    }

    #[test]
    fn test_summary_grand_total_equals_method_sums() {
        let store = KvStore::open_in_memory().unwrap();
        seed_payment(&store, "1", PaymentMethod::Cash, "100.00", 1);
        seed_payment(&store, "2", PaymentMethod::Cash, "50.50", 2);
        seed_payment(&store, "3", PaymentMethod::Card, "75.25", 3);
        seed_payment(&store, "4", PaymentMethod::Qr, "10.00", 4);

        let payments = PaymentRepository::new(store).find_all().unwrap();
        let summary = summarize_by_method(&payments);

        let method_sum: Decimal = summary.methods.iter().map(|m| m.sum).sum();
        assert_eq!(summary.grand_total, method_sum);
        assert_eq!(summary.grand_total, dec("235.75"));
        assert_eq!(summary.transactions, 4);

        let cash = summary
            .methods
            .iter()
            .find(|m| m.method == PaymentMethod::Cash)
            .unwrap();
        assert_eq!(cash.count, 2);
        assert_eq!(cash.sum, dec("150.50"));
        // Absent methods are not reported
        assert!(
            !summary
                .methods
                .iter()
                .any(|m| m.method == PaymentMethod::Transfer)
        );
    }

    #[test]
    fn test_daily_filter_uses_local_midnight() {
        let store = KvStore::open_in_memory().unwrap();
        // 23:50 local on the 14th and 00:10 local on the 15th straddle the
        // local midnight but sit in the same UTC day
        seed_payment(
            &store,
            "a",
            PaymentMethod::Cash,
            "10.00",
            local_millis(2025, 3, 14, 23, 50),
        );
        seed_payment(
            &store,
            "b",
            PaymentMethod::Cash,
            "20.00",
            local_millis(2025, 3, 15, 0, 10),
        );

        let recon = CashReconciliation::new(store);
        let day14 = recon
            .daily_payments(time::parse_date("2025-03-14").unwrap(), tz())
            .unwrap();
        let day15 = recon
            .daily_payments(time::parse_date("2025-03-15").unwrap(), tz())
            .unwrap();

        assert_eq!(day14.len(), 1);
        assert_eq!(day14[0].total, dec("10.00"));
        assert_eq!(day15.len(), 1);
        assert_eq!(day15[0].total, dec("20.00"));
    }

    #[test]
    fn test_closing_difference_is_signed() {
        let store = KvStore::open_in_memory().unwrap();
        seed_payment(
            &store,
            "a",
            PaymentMethod::Cash,
            "300.00",
            local_millis(2025, 3, 14, 12, 0),
        );

        let recon = CashReconciliation::new(store);
        let closing = recon
            .generate_closing(
                CashClosingCreate {
                    cash_count: dec("295.00"),
                    notes: Some("Turno noche".to_string()),
                    date: Some("2025-03-14".to_string()),
                },
                tz(),
                Some("cashier-1".to_string()),
            )
            .unwrap();

        assert_eq!(closing.expected_cash, dec("300.00"));
        // Shortfall stays negative, never an absolute value
        assert_eq!(closing.difference, dec("-5.00"));
        assert_eq!(closing.total_transactions, 1);
    }

    #[test]
    fn test_closing_snapshots_totals_by_method() {
        let store = KvStore::open_in_memory().unwrap();
        let noon = local_millis(2025, 3, 14, 12, 0);
        seed_payment(&store, "a", PaymentMethod::Cash, "100.00", noon);
        seed_payment(&store, "b", PaymentMethod::Card, "80.00", noon);
        seed_payment(&store, "c", PaymentMethod::Transfer, "20.00", noon);

        let recon = CashReconciliation::new(store);
        let closing = recon
            .generate_closing(
                CashClosingCreate {
                    cash_count: dec("100.00"),
                    notes: None,
                    date: Some("2025-03-14".to_string()),
                },
                tz(),
                None,
            )
            .unwrap();

        assert_eq!(closing.total_sales, dec("200.00"));
        assert_eq!(closing.total_cash, dec("100.00"));
        assert_eq!(closing.total_card, dec("80.00"));
        assert_eq!(closing.difference, Decimal::ZERO);
    }

    #[test]
    fn test_closings_are_frozen_snapshots() {
        let store = KvStore::open_in_memory().unwrap();
        let noon = local_millis(2025, 3, 14, 12, 0);
        seed_payment(&store, "a", PaymentMethod::Cash, "100.00", noon);

        let recon = CashReconciliation::new(store.clone());
        let first = recon
            .generate_closing(
                CashClosingCreate {
                    cash_count: dec("100.00"),
                    notes: None,
                    date: Some("2025-03-14".to_string()),
                },
                tz(),
                None,
            )
            .unwrap();

        // A payment backdated into the same day after the closing
        seed_payment(&store, "late", PaymentMethod::Cash, "50.00", noon + 1);

        let closings = recon.list_closings().unwrap();
        let stored = closings.iter().find(|c| c.id == first.id).unwrap();
        assert_eq!(stored.expected_cash, dec("100.00"));
        assert_eq!(stored.total_transactions, 1);

        // A second closing for the same day recomputes its own totals
        let second = recon
            .generate_closing(
                CashClosingCreate {
                    cash_count: dec("150.00"),
                    notes: None,
                    date: Some("2025-03-14".to_string()),
                },
                tz(),
                None,
            )
            .unwrap();
        assert_eq!(second.expected_cash, dec("150.00"));
        assert_eq!(recon.list_closings().unwrap().len(), 2);
    }

    #[test]
    fn test_negative_cash_count_rejected() {
        let recon = CashReconciliation::new(KvStore::open_in_memory().unwrap());
        let result = recon.generate_closing(
            CashClosingCreate {
                cash_count: dec("-1.00"),
                notes: None,
                date: None,
            },
            tz(),
            None,
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
