//! Ordering, deduplication and due-month resolution over ledger history.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use chrono::Months;

use super::{month_tag::MonthTag, transaction::Transaction};
use crate::core::time::Clock;

/// Newest-first sort key. Tagged records outrank untagged ones; within each
/// group the larger value is newer.
fn recency_key(transaction: &Transaction) -> Reverse<(bool, i64)> {
    match transaction.month_tag() {
        Some(tag) => Reverse((true, tag.ordinal())),
        None => Reverse((false, transaction.timestamp_millis())),
    }
}

/// Returns a copy of `transactions` ordered newest-first.
///
/// Records whose description carries a month tag are ordered by that tag and
/// always precede records without one; the rest fall back to their timestamp.
/// Ties keep their input order.
pub fn sort_newest_first(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by_cached_key(recency_key);
    sorted
}

/// Canonical `YYYY-MM` key for a contribution, if one can be derived.
pub fn contribution_month_key(transaction: &Transaction) -> Option<String> {
    transaction
        .month_tag()
        .map(|tag| tag.key())
        .or_else(|| transaction.timestamp_month_key())
}

/// Number of distinct calendar months with at least one contribution.
pub fn count_contribution_months(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|txn| txn.is_contribution())
        .filter_map(contribution_month_key)
        .collect::<BTreeSet<_>>()
        .len()
}

/// The month the next contribution is owed for.
///
/// Only the newest contribution is consulted: its description tag when
/// present, otherwise its timestamp advanced by one calendar month. With no
/// usable history the current month applies.
pub fn next_due_month(transactions: &[Transaction], clock: &dyn Clock) -> MonthTag {
    let current = MonthTag::from_date(clock.today());
    let sorted = sort_newest_first(transactions);
    let Some(latest) = sorted.iter().find(|txn| txn.is_contribution()) else {
        tracing::debug!(%current, "no contributions recorded; due month is the current one");
        return current;
    };

    if let Some(tag) = latest.month_tag() {
        return tag.next();
    }

    latest
        .parsed_timestamp()
        .and_then(|moment| moment.date().checked_add_months(Months::new(1)))
        .map(MonthTag::from_date)
        .unwrap_or_else(|| {
            tracing::debug!(
                description = %latest.description,
                "latest contribution has neither tag nor readable timestamp"
            );
            current
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use chrono::NaiveDate;

    fn aporte(description: &str, timestamp: Option<&str>) -> Transaction {
        Transaction::new("Aporte Mensual", description, timestamp.map(String::from), 100.0)
    }

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn tagged_records_sort_before_untagged_ones() {
        let input = vec![
            aporte("sin etiqueta", Some("2030-01-01T00:00:00")),
            aporte("Aporte (Enero 2024)", None),
            aporte("Aporte (Marzo 2024)", Some("2020-01-01")),
        ];
        let sorted = sort_newest_first(&input);
        let descriptions: Vec<_> = sorted.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Aporte (Marzo 2024)", "Aporte (Enero 2024)", "sin etiqueta"]
        );
    }

    #[test]
    fn untagged_records_sort_by_timestamp_with_invalid_last() {
        let input = vec![
            aporte("a", Some("garbage")),
            aporte("b", Some("2024-01-10")),
            aporte("c", None),
            aporte("d", Some("2024-05-01T08:00:00")),
        ];
        let sorted = sort_newest_first(&input);
        let descriptions: Vec<_> = sorted.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn sorting_leaves_the_input_untouched() {
        let input = vec![aporte("x (Enero 2024)", None), aporte("y (Mayo 2024)", None)];
        let snapshot = input.clone();
        let _ = sort_newest_first(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn counts_distinct_months_only_for_contributions() {
        let input = vec![
            aporte("Aporte (Enero 2024)", None),
            aporte("Aporte (Enero 2024)", Some("2024-03-01")),
            aporte("sin mes", Some("2024-01-15T00:00:00")),
            aporte("sin mes", Some("2024-02-15T00:00:00")),
            aporte("sin nada", None),
            Transaction::new("Préstamo", "Préstamo (Junio 2024)", None, 5.0),
        ];
        assert_eq!(count_contribution_months(&input), 2);
    }

    #[test]
    fn next_due_month_uses_the_newest_tag() {
        let input = vec![
            aporte("Pago (Febrero 2024)", None),
            aporte("Pago (Marzo 2024)", None),
        ];
        let due = next_due_month(&input, &clock());
        assert_eq!((due.month_name(), due.year), ("Abril", 2024));
    }

    #[test]
    fn next_due_month_falls_back_to_the_timestamp() {
        let input = vec![aporte("manual", Some("2024-01-31T12:00:00"))];
        let due = next_due_month(&input, &clock());
        assert_eq!((due.month_name(), due.year), ("Febrero", 2024));

        let december = vec![aporte("manual", Some("2024-12-15"))];
        let due = next_due_month(&december, &clock());
        assert_eq!((due.month_name(), due.year), ("Enero", 2025));
    }

    #[test]
    fn next_due_month_defaults_to_today() {
        let expected = ("Octubre", 2026);
        let due = next_due_month(&[], &clock());
        assert_eq!((due.month_name(), due.year), expected);

        let unreadable = vec![aporte("manual", Some("???"))];
        let due = next_due_month(&unreadable, &clock());
        assert_eq!((due.month_name(), due.year), expected);

        let only_loans = vec![Transaction::new("Préstamo", "(Enero 2020)", None, 1.0)];
        let due = next_due_month(&only_loans, &clock());
        assert_eq!((due.month_name(), due.year), expected);
    }
}
