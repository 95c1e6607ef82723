//! Loan quoting, installment plans and repayment bookkeeping.

pub mod plan;
pub mod position;
pub mod quote;

pub use plan::{Installment, PaymentPlan};
pub use position::{loan_payments, payment_tag, LoanPayment, LoanPosition};
pub use quote::{installment_amount, LoanQuote};

/// Rounds to `places` decimal digits, half away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
