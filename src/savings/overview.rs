use serde::Serialize;

use super::account::SavingsAccount;
use crate::{
    core::time::Clock,
    ledger::{count_contribution_months, next_due_month, sort_newest_first, MonthTag, Transaction},
    simulation::{project_savings, SavingsProjection},
};

/// Snapshot of a member's savings derived from their account and ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsOverview {
    pub next_due: MonthTag,
    pub months_contributed: usize,
    pub projection: SavingsProjection,
    pub recent: Vec<Transaction>,
}

impl SavingsOverview {
    /// Combines the due month, contribution count and projection, plus the
    /// newest `history_limit` ledger records.
    pub fn build(
        account: &SavingsAccount,
        transactions: &[Transaction],
        clock: &dyn Clock,
        history_limit: usize,
    ) -> Self {
        let months_contributed = count_contribution_months(transactions);
        let elapsed = u32::try_from(months_contributed).unwrap_or(u32::MAX);
        let projection = project_savings(
            account.monthly_contribution,
            elapsed,
            account.interest_rate_pct,
        );

        let mut recent = sort_newest_first(transactions);
        recent.truncate(history_limit);

        Self {
            next_due: next_due_month(transactions, clock),
            months_contributed,
            projection,
            recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn overview_ties_the_pipeline_together() {
        let account = SavingsAccount::new(100000.0, 10.0);
        let transactions = vec![
            Transaction::new("Aporte Mensual", "Aporte (Enero 2024)", None, 100000.0),
            Transaction::new("Aporte Mensual", "Aporte (Febrero 2024)", None, 100000.0),
            Transaction::new("Aporte Mensual", "Aporte (Febrero 2024)", None, 100000.0),
            Transaction::new("Aporte Mensual", "Aporte (Marzo 2024)", None, 100000.0),
            Transaction::new("Préstamo", "Préstamo creado (plazo 6 meses)", None, 5.0),
        ];
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());

        let overview = SavingsOverview::build(&account, &transactions, &clock, 2);

        assert_eq!(overview.next_due.to_string(), "Abril 2024");
        assert_eq!(overview.months_contributed, 3);
        assert!((overview.projection.total_accumulated - 364100.0).abs() < 1e-6);
        assert_eq!(overview.recent.len(), 2);
        assert_eq!(overview.recent[0].description, "Aporte (Marzo 2024)");
    }
}
