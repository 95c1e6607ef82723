use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::errors::NatilleraError;

/// Monthly installment for `total` over `term_months`; the whole total when the
/// term is zero.
pub fn installment_amount(total: f64, term_months: u32) -> f64 {
    if term_months == 0 {
        total
    } else {
        total / f64::from(term_months)
    }
}

/// Terms offered to a member before the loan is created.
///
/// Interest is simple: the monthly rate applies to the principal once per
/// month of the term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanQuote {
    pub principal: f64,
    pub monthly_rate_pct: f64,
    pub term_months: u32,
    pub total_interest: f64,
    pub total: f64,
    pub installment: f64,
    pub start: NaiveDate,
    pub due_date: NaiveDate,
}

impl LoanQuote {
    pub fn new(
        principal: f64,
        monthly_rate_pct: f64,
        term_months: u32,
        start: NaiveDate,
    ) -> Result<Self, NatilleraError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(NatilleraError::InvalidInput(format!(
                "loan principal must be positive, got {principal}"
            )));
        }
        if !monthly_rate_pct.is_finite() || monthly_rate_pct < 0.0 {
            return Err(NatilleraError::InvalidInput(format!(
                "interest rate cannot be negative, got {monthly_rate_pct}"
            )));
        }
        if term_months == 0 {
            return Err(NatilleraError::InvalidInput(
                "loan term must be at least one month".into(),
            ));
        }

        let total_interest = principal * (monthly_rate_pct / 100.0) * f64::from(term_months);
        let total = principal + total_interest;
        let due_date = start
            .checked_add_months(Months::new(term_months))
            .ok_or_else(|| NatilleraError::InvalidInput("loan due date out of range".into()))?;

        Ok(Self {
            principal,
            monthly_rate_pct,
            term_months,
            total_interest,
            total,
            installment: installment_amount(total, term_months),
            start,
            due_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn quotes_simple_monthly_interest() {
        let quote = LoanQuote::new(1_000_000.0, 2.0, 6, date(2024, 1, 31)).unwrap();
        assert!((quote.total_interest - 120_000.0).abs() < 1e-6);
        assert!((quote.total - 1_120_000.0).abs() < 1e-6);
        assert!((quote.installment - 1_120_000.0 / 6.0).abs() < 1e-6);
        assert_eq!(quote.due_date, date(2024, 7, 31));
    }

    #[test]
    fn due_date_clamps_to_month_end() {
        let quote = LoanQuote::new(500.0, 0.0, 1, date(2024, 1, 31)).unwrap();
        assert_eq!(quote.due_date, date(2024, 2, 29));
        assert_eq!(quote.total, 500.0);
    }

    #[test]
    fn rejects_invalid_terms() {
        let start = date(2024, 1, 1);
        assert!(LoanQuote::new(0.0, 1.0, 3, start).is_err());
        assert!(LoanQuote::new(100.0, -1.0, 3, start).is_err());
        assert!(LoanQuote::new(100.0, 1.0, 0, start).is_err());
        assert!(LoanQuote::new(f64::NAN, 1.0, 3, start).is_err());
    }

    #[test]
    fn zero_term_installment_is_the_total() {
        assert_eq!(installment_amount(900.0, 0), 900.0);
        assert_eq!(installment_amount(900.0, 3), 300.0);
    }
}
