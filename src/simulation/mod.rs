//! Compounded savings projection.

use serde::{Deserialize, Serialize};

use crate::utils::lenient::finite_or_zero;

/// Outcome of compounding a fixed monthly contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub total_contributed: f64,
    pub total_accumulated: f64,
    pub interest_earned: f64,
}

/// Compounds `monthly_amount` over `elapsed_months`.
///
/// Each month the contribution is added first and the month's interest is
/// then applied to the whole balance. Non-finite inputs count as zero. For
/// non-negative inputs the reported interest is never below zero, even when
/// float rounding leaves the balance a hair under the plain sum.
pub fn project_savings(
    monthly_amount: f64,
    elapsed_months: u32,
    monthly_rate_percent: f64,
) -> SavingsProjection {
    let monthly_amount = finite_or_zero(monthly_amount);
    let rate = finite_or_zero(monthly_rate_percent);
    if elapsed_months == 0 {
        return SavingsProjection::default();
    }

    let factor = 1.0 + rate / 100.0;
    let balance = (0..elapsed_months).fold(0.0, |balance, _| (balance + monthly_amount) * factor);

    let total_contributed = monthly_amount * f64::from(elapsed_months);
    let mut interest_earned = balance - total_contributed;
    if monthly_amount >= 0.0 && rate >= 0.0 && interest_earned < 0.0 {
        interest_earned = 0.0;
    }

    SavingsProjection {
        total_contributed,
        total_accumulated: balance,
        interest_earned,
    }
}
