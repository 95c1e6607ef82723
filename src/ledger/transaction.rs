use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::month_tag::{parse_month_tag, MonthTag};
use crate::utils::lenient;

/// Kind written by the backend when a monthly contribution is posted.
pub const CONTRIBUTION_KIND: &str = "Aporte Mensual";
/// Kind written by the backend for loan repayments.
pub const LOAN_PAYMENT_KIND: &str = "Pago Préstamo";

/// Format used when stamping records created by this crate.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const CONTRIBUTION_MARKER: &str = "aporte";

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A ledger movement as exported by the backend.
///
/// Missing or malformed fields are replaced with defaults while decoding, so
/// every accessor below works on plain values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "tipo", default, deserialize_with = "lenient::text")]
    pub kind: String,
    #[serde(rename = "descripcion", default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(rename = "fecha", default, deserialize_with = "lenient::optional_text")]
    pub timestamp: Option<String>,
    #[serde(rename = "monto", default, deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(
        rename = "categoria",
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: impl Into<String>,
        description: impl Into<String>,
        timestamp: Option<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            description: description.into(),
            timestamp,
            amount: lenient::finite_or_zero(amount),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// True when the kind contains "aporte", ignoring case.
    pub fn is_contribution(&self) -> bool {
        self.kind.to_lowercase().contains(CONTRIBUTION_MARKER)
    }

    /// Month tag embedded in the description, if any.
    pub fn month_tag(&self) -> Option<MonthTag> {
        parse_month_tag(&self.description)
    }

    /// Parsed timestamp, or `None` when absent or unreadable.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    /// Milliseconds since the epoch; unreadable timestamps count as zero.
    pub fn timestamp_millis(&self) -> i64 {
        self.parsed_timestamp()
            .map(|moment| moment.and_utc().timestamp_millis())
            .unwrap_or(0)
    }

    /// Fallback month key: the leading `YYYY-MM` slice of the raw timestamp.
    pub fn timestamp_month_key(&self) -> Option<String> {
        let raw = self.timestamp.as_deref()?;
        if raw.is_empty() {
            return None;
        }
        Some(raw.chars().take(7).collect())
    }
}

/// Parses the ISO-8601 flavours the backend emits.
///
/// Offsets are honoured by converting to UTC; naive values are taken as-is and
/// bare dates resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(moment.naive_utc());
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(moment) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(moment);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}
