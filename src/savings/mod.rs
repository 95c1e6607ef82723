//! Member savings accounts: configuration, contribution posting and the overview shown to admins.

pub mod account;
pub mod overview;

pub use account::{ContributionReceipt, SavingsAccount, DEFAULT_INTEREST_RATE_PCT};
pub use overview::SavingsOverview;
