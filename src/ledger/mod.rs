//! Ledger records as exported by the backend and the history helpers built on them.

pub mod history;
pub mod month_tag;
pub mod transaction;

pub use history::{
    contribution_month_key, count_contribution_months, next_due_month, sort_newest_first,
};
pub use month_tag::{month_index, parse_month_tag, MonthTag, MONTH_NAMES};
pub use transaction::{
    parse_timestamp, Transaction, CONTRIBUTION_KIND, LOAN_PAYMENT_KIND, RECORD_TIMESTAMP_FORMAT,
};
