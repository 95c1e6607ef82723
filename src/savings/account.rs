use serde::{Deserialize, Serialize};

use crate::{
    core::time::Clock,
    errors::NatilleraError,
    ledger::{
        next_due_month, MonthTag, Transaction, CONTRIBUTION_KIND, RECORD_TIMESTAMP_FORMAT,
    },
    utils::lenient,
};

/// Monthly rate applied to accounts that were never configured.
pub const DEFAULT_INTEREST_RATE_PCT: f64 = 8.5;

const INCOME_CATEGORY: &str = "ingreso";

fn default_rate() -> f64 {
    DEFAULT_INTEREST_RATE_PCT
}

/// Savings configuration and running balance for one member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsAccount {
    #[serde(rename = "ahorro_mensual", default, deserialize_with = "lenient::number")]
    pub monthly_contribution: f64,
    #[serde(rename = "total_ahorrado", default, deserialize_with = "lenient::number")]
    pub total_saved: f64,
    #[serde(
        rename = "porcentaje_interes",
        default = "default_rate",
        deserialize_with = "lenient::number"
    )]
    pub interest_rate_pct: f64,
    #[serde(rename = "interes_ganado", default, deserialize_with = "lenient::number")]
    pub interest_earned: f64,
}

impl Default for SavingsAccount {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_INTEREST_RATE_PCT)
    }
}

/// Everything produced by posting one monthly contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionReceipt {
    pub due: MonthTag,
    pub amount: f64,
    pub total_saved: f64,
    pub interest_earned: f64,
    pub transaction: Transaction,
}

impl SavingsAccount {
    pub fn new(monthly_contribution: f64, interest_rate_pct: f64) -> Self {
        Self {
            monthly_contribution: lenient::finite_or_zero(monthly_contribution),
            total_saved: 0.0,
            interest_rate_pct: lenient::finite_or_zero(interest_rate_pct),
            interest_earned: 0.0,
        }
    }

    /// Updates the monthly contribution and rate, leaving balances untouched.
    pub fn configure(&mut self, monthly_contribution: f64, interest_rate_pct: f64) {
        self.monthly_contribution = lenient::finite_or_zero(monthly_contribution).trunc();
        self.interest_rate_pct = lenient::finite_or_zero(interest_rate_pct);
    }

    /// Posts the configured contribution for the next due month.
    ///
    /// The balance grows by the contribution and one month of interest, and is
    /// kept in whole currency units. The returned transaction is the ledger
    /// record to append to `history`.
    pub fn post_contribution(
        &mut self,
        history: &[Transaction],
        clock: &dyn Clock,
    ) -> Result<ContributionReceipt, NatilleraError> {
        let amount = self.monthly_contribution.trunc();
        if amount <= 0.0 {
            return Err(NatilleraError::InvalidInput(
                "define a positive monthly contribution before posting".into(),
            ));
        }

        let rate = self.interest_rate_pct / 100.0;
        let before = self.total_saved;
        let after = (before + amount) * (1.0 + rate);

        self.total_saved = after.round();
        self.interest_earned += self.total_saved - (before + amount);

        let due = next_due_month(history, clock);
        let timestamp = clock.local_now().format(RECORD_TIMESTAMP_FORMAT).to_string();
        let transaction = Transaction::new(
            CONTRIBUTION_KIND,
            format!("Aporte mensual registrado ({due})"),
            Some(timestamp),
            amount,
        )
        .with_category(INCOME_CATEGORY);

        tracing::info!(
            %due,
            amount,
            total_saved = self.total_saved,
            "contribution posted"
        );

        Ok(ContributionReceipt {
            due,
            amount,
            total_saved: self.total_saved,
            interest_earned: self.interest_earned,
            transaction,
        })
    }

    /// Clears balances while keeping the configured contribution and rate.
    pub fn reset(&mut self) {
        self.total_saved = 0.0;
        self.interest_earned = 0.0;
        tracing::info!("savings balances reset");
    }
}
