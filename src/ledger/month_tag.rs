use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Month vocabulary used by the backend when it writes descriptions.
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

static MONTH_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\(((?-u:Enero|Febrero|Marzo|Abril|Mayo|Junio|Julio|Agosto|Septiembre|Octubre|Noviembre|Diciembre))\s+([0-9]{4})\)",
    )
    .expect("month tag pattern is valid")
});

/// Canonical calendar month used to order and deduplicate ledger records.
///
/// Ordering follows `year * 12 + month_index`, which the derived `Ord`
/// reproduces because `year` is compared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthTag {
    pub year: i32,
    /// Zero-based month, `0..=11`.
    pub month_index: u32,
}

impl MonthTag {
    /// Builds a tag, rejecting month indexes outside `0..=11`.
    pub fn new(year: i32, month_index: u32) -> Option<Self> {
        (month_index < 12).then_some(Self { year, month_index })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month_index: date.month0(),
        }
    }

    /// Months elapsed since year zero; the total order key.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month_index)
    }

    /// The following calendar month, rolling December into January.
    pub fn next(&self) -> Self {
        if self.month_index >= 11 {
            Self {
                year: self.year + 1,
                month_index: 0,
            }
        } else {
            Self {
                year: self.year,
                month_index: self.month_index + 1,
            }
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month_index as usize % 12]
    }

    /// `YYYY-MM` with a one-based, zero-padded month.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month_index + 1)
    }
}

impl fmt::Display for MonthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Resolves a Spanish month name to its zero-based index, ignoring case.
pub fn month_index(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|candidate| candidate.to_lowercase() == name.to_lowercase())
        .map(|idx| idx as u32)
}

/// Extracts the `(MonthName YYYY)` tag embedded in a description.
///
/// Only the first match is considered.
pub fn parse_month_tag(description: &str) -> Option<MonthTag> {
    let captures = MONTH_TAG_PATTERN.captures(description)?;
    let month = month_index(captures.get(1)?.as_str())?;
    let year = captures.get(2)?.as_str().parse::<i32>().ok()?;
    MonthTag::new(year, month)
}
