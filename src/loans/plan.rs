use chrono::{Months, NaiveDate};
use serde::Serialize;

use super::{quote::installment_amount, round_to};
use crate::ledger::Transaction;

/// A single scheduled installment ("cuota").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Installment {
    /// One-based position in the plan.
    pub number: u32,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub paid: bool,
    /// Timestamp of the matching payment record, when one exists.
    pub paid_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentPlan {
    pub total_interest: f64,
    pub total: f64,
    pub installment: f64,
    pub monthly_interest_pct: f64,
    pub installments_paid: u32,
    pub installments_total: u32,
    pub installments: Vec<Installment>,
}

impl PaymentPlan {
    /// Lays out the installment schedule and marks what is already paid.
    ///
    /// Paid installments are counted from the accumulated amount rather than
    /// the number of payments, so irregular payments still settle whole
    /// installments. Returns `None` for a zero term.
    pub fn build(
        principal: f64,
        total_interest: f64,
        term_months: u32,
        start: NaiveDate,
        payments: &[Transaction],
    ) -> Option<Self> {
        if term_months == 0 {
            return None;
        }

        let total = principal + total_interest;
        let installment = installment_amount(total, term_months);
        let amount_paid: f64 = payments.iter().map(|payment| payment.amount).sum();

        let installments_paid = if installment > 0.0 {
            ((amount_paid / installment).floor().max(0.0) as u32).min(term_months)
        } else {
            0
        };

        let installments = (1..=term_months)
            .map(|number| {
                let paid = number <= installments_paid;
                let paid_on = if paid {
                    payments
                        .get(number as usize - 1)
                        .and_then(|payment| payment.timestamp.clone())
                } else {
                    None
                };
                Installment {
                    number,
                    due_date: start
                        .checked_add_months(Months::new(number))
                        .unwrap_or(NaiveDate::MAX),
                    amount: round_to(installment, 2),
                    paid,
                    paid_on,
                }
            })
            .collect();

        let monthly_interest_pct = if principal > 0.0 && total_interest != 0.0 {
            round_to(
                total_interest / (principal * f64::from(term_months)) * 100.0,
                4,
            )
        } else {
            0.0
        };

        Some(Self {
            total_interest: round_to(total_interest, 2),
            total: round_to(total, 2),
            installment: round_to(installment, 2),
            monthly_interest_pct,
            installments_paid,
            installments_total: term_months,
            installments,
        })
    }

    pub fn next_unpaid(&self) -> Option<&Installment> {
        self.installments.iter().find(|item| !item.paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LOAN_PAYMENT_KIND;

    fn payment(amount: f64, timestamp: &str) -> Transaction {
        Transaction::new(
            LOAN_PAYMENT_KIND,
            "Pago de préstamo [prestamo_id:1]",
            Some(timestamp.into()),
            amount,
        )
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn counts_installments_from_the_amount_paid() {
        let payments = vec![
            payment(110_000.0, "2024-02-10T00:00:00"),
            payment(120_000.0, "2024-03-12T00:00:00"),
        ];
        let plan = PaymentPlan::build(1_000_000.0, 100_000.0, 10, start(), &payments).unwrap();

        assert_eq!(plan.installment, 110_000.0);
        assert_eq!(plan.installments_paid, 2);
        assert_eq!(plan.installments_total, 10);
        assert_eq!(plan.installments.len(), 10);
        assert_eq!(plan.monthly_interest_pct, 1.0);
        assert_eq!(
            plan.installments[1].paid_on.as_deref(),
            Some("2024-03-12T00:00:00")
        );
        assert_eq!(plan.next_unpaid().map(|item| item.number), Some(3));
        assert_eq!(
            plan.installments[0].due_date,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
    }

    #[test]
    fn one_large_payment_covers_several_installments() {
        let payments = vec![payment(500_000.0, "2024-02-01")];
        let plan = PaymentPlan::build(300_000.0, 0.0, 3, start(), &payments).unwrap();

        assert_eq!(plan.installments_paid, 3);
        assert!(plan.installments.iter().all(|item| item.paid));
        assert_eq!(plan.installments[0].paid_on.as_deref(), Some("2024-02-01"));
        assert_eq!(plan.installments[2].paid_on, None);
        assert_eq!(plan.monthly_interest_pct, 0.0);
        assert!(plan.next_unpaid().is_none());
    }

    #[test]
    fn zero_term_has_no_plan() {
        assert!(PaymentPlan::build(100.0, 10.0, 0, start(), &[]).is_none());
    }

    #[test]
    fn installment_amounts_round_to_cents() {
        let plan = PaymentPlan::build(100.0, 0.0, 3, start(), &[]).unwrap();
        assert_eq!(plan.installment, 33.33);
        assert_eq!(plan.installments_paid, 0);
    }
}
