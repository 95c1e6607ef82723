use serde::Serialize;

use crate::{
    core::time::Clock,
    errors::NatilleraError,
    ledger::{Transaction, LOAN_PAYMENT_KIND, RECORD_TIMESTAMP_FORMAT},
};

const LOAN_CATEGORY: &str = "prestamo";

/// Marker embedded in payment descriptions to tie them to a loan.
pub fn payment_tag(loan_id: i64) -> String {
    format!("[prestamo_id:{loan_id}]")
}

/// Payment records for `loan_id`, oldest first.
pub fn loan_payments(transactions: &[Transaction], loan_id: i64) -> Vec<Transaction> {
    let tag = payment_tag(loan_id).to_lowercase();
    let mut payments: Vec<Transaction> = transactions
        .iter()
        .filter(|txn| txn.kind == LOAN_PAYMENT_KIND)
        .filter(|txn| txn.description.to_lowercase().contains(&tag))
        .cloned()
        .collect();
    payments.sort_by_key(Transaction::timestamp_millis);
    payments
}

/// Outstanding balance of a loan against the payments recorded so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanPosition {
    pub total: f64,
    pub paid: f64,
}

/// A repayment accepted by [`LoanPosition::register_payment`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoanPayment {
    pub amount: f64,
    pub outstanding_after: f64,
    pub settled: bool,
    pub transaction: Transaction,
}

impl LoanPosition {
    pub fn new(total: f64, paid: f64) -> Self {
        Self { total, paid }
    }

    /// Position of `loan_id` given the full ledger.
    pub fn from_ledger(total: f64, transactions: &[Transaction], loan_id: i64) -> Self {
        let paid = loan_payments(transactions, loan_id)
            .iter()
            .map(|payment| payment.amount)
            .sum();
        Self::new(total, paid)
    }

    pub fn outstanding(&self) -> f64 {
        (self.total - self.paid).max(0.0)
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding() <= 0.0
    }

    /// Accepts a repayment and returns the ledger record to store.
    ///
    /// Without a positive `requested` amount one installment is charged. The
    /// amount never exceeds the outstanding balance, and a charge that would
    /// round to nothing or overshoot settles the exact remainder instead.
    pub fn register_payment(
        &mut self,
        loan_id: i64,
        requested: Option<f64>,
        term_months: u32,
        clock: &dyn Clock,
    ) -> Result<LoanPayment, NatilleraError> {
        if self.is_settled() {
            return Err(NatilleraError::LoanSettled);
        }

        let amount = match requested {
            Some(value) if value.is_finite() && value > 0.0 => value,
            _ if term_months > 0 => (self.total / f64::from(term_months)).round(),
            _ => {
                return Err(NatilleraError::InvalidInput(
                    "payment amount must be positive".into(),
                ))
            }
        };

        let outstanding = self.outstanding();
        let amount = if amount <= 0.0 || amount >= outstanding {
            self.paid = self.total;
            outstanding
        } else {
            self.paid += amount;
            amount
        };
        let outstanding_after = self.outstanding();
        let settled = outstanding_after <= 0.0;

        tracing::info!(loan_id, amount, outstanding_after, settled, "loan payment registered");

        let transaction = Transaction::new(
            LOAN_PAYMENT_KIND,
            format!("Pago de préstamo {}", payment_tag(loan_id)),
            Some(clock.local_now().format(RECORD_TIMESTAMP_FORMAT).to_string()),
            amount,
        )
        .with_category(LOAN_CATEGORY);

        Ok(LoanPayment {
            amount,
            outstanding_after,
            settled,
            transaction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::loans::LoanQuote;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap())
    }

    fn payment(loan_id: i64, amount: f64, timestamp: &str) -> Transaction {
        Transaction::new(
            LOAN_PAYMENT_KIND,
            format!("Pago de préstamo {}", payment_tag(loan_id)),
            Some(timestamp.into()),
            amount,
        )
    }

    #[test]
    fn selects_payments_for_one_loan_oldest_first() {
        let ledger = vec![
            payment(1, 300.0, "2024-03-01"),
            payment(2, 999.0, "2024-01-01"),
            payment(1, 200.0, "2024-02-01"),
            Transaction::new("Aporte", "[prestamo_id:1]", None, 50.0),
            Transaction::new(LOAN_PAYMENT_KIND, "pago [PRESTAMO_ID:1]", None, 10.0),
        ];
        let payments = loan_payments(&ledger, 1);
        let amounts: Vec<f64> = payments.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![10.0, 200.0, 300.0]);

        let position = LoanPosition::from_ledger(1000.0, &ledger, 1);
        assert_eq!(position.paid, 510.0);
        assert_eq!(position.outstanding(), 490.0);
    }

    #[test]
    fn default_payment_is_one_installment() {
        let mut position = LoanPosition::new(1200.0, 0.0);
        let payment = position.register_payment(4, None, 12, &clock()).unwrap();
        assert_eq!(payment.amount, 100.0);
        assert_eq!(payment.outstanding_after, 1100.0);
        assert!(!payment.settled);
        assert_eq!(
            payment.transaction.description,
            "Pago de préstamo [prestamo_id:4]"
        );
    }

    #[test]
    fn payments_are_capped_at_the_outstanding_balance() {
        let mut position = LoanPosition::new(1000.0, 900.0);
        let payment = position.register_payment(1, Some(500.0), 10, &clock()).unwrap();
        assert_eq!(payment.amount, 100.0);
        assert!(payment.settled);
        assert!(matches!(
            position.register_payment(1, None, 10, &clock()),
            Err(NatilleraError::LoanSettled)
        ));
    }

    #[test]
    fn zero_term_requires_an_explicit_amount() {
        let mut position = LoanPosition::new(1000.0, 0.0);
        assert!(matches!(
            position.register_payment(1, Some(0.0), 0, &clock()),
            Err(NatilleraError::InvalidInput(_))
        ));
        assert!(position.register_payment(1, Some(250.0), 0, &clock()).is_ok());
    }

    #[test]
    fn fractional_remainder_is_settled_exactly() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let quote = LoanQuote::new(1001.0, 1.33, 1, start).unwrap();
        let mut position = LoanPosition::new(quote.total, 0.0);

        let first = position.register_payment(1, None, 1, &clock()).unwrap();
        assert_eq!(first.amount, 1014.0);
        assert!(!first.settled);

        let last = position.register_payment(1, None, 1, &clock()).unwrap();
        assert!(last.amount > 0.0 && last.amount < 1.0);
        assert!(last.settled);
        assert_eq!(last.outstanding_after, 0.0);
        assert!(matches!(
            position.register_payment(1, None, 1, &clock()),
            Err(NatilleraError::LoanSettled)
        ));
    }

    #[test]
    fn payment_records_are_stamped_from_the_clock() {
        let mut position = LoanPosition::new(600.0, 0.0);
        let payment = position.register_payment(9, None, 3, &clock()).unwrap();

        assert_eq!(
            payment.transaction.timestamp.as_deref(),
            Some("2024-02-15T00:00:00")
        );
        assert_eq!(payment.transaction.category.as_deref(), Some("prestamo"));

        let ledger = vec![payment.transaction];
        let recorded = loan_payments(&ledger, 9);
        assert_eq!(recorded[0].timestamp_millis(), ledger[0].timestamp_millis());
        assert!(recorded[0].timestamp_millis() > 0);
    }
}
