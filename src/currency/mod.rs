//! Locale-aware money formatting for member-facing output.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("COP")
    }
}

/// Separators and precision used when rendering amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub max_fraction_digits: u8,
    pub currency: CurrencyCode,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("es-CO", CurrencyCode::default())
    }
}

impl LocaleConfig {
    /// Known separators for `tag`; unknown tags use the es-CO conventions.
    pub fn for_tag(tag: &str, currency: CurrencyCode) -> Self {
        let (decimal_separator, grouping_separator) = match tag {
            "en-US" | "en-GB" | "es-MX" => ('.', ','),
            _ => (',', '.'),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
            max_fraction_digits: 2,
            currency,
        }
    }
}

/// Renders `value` with grouping and at most `precision` fraction digits,
/// dropping trailing zeros.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, fraction.trim_end_matches('0')),
        None => (body.as_str(), ""),
    };

    let mut rendered = group_digits(int_part, locale.grouping_separator);
    if !fraction.is_empty() {
        rendered.push(locale.decimal_separator);
        rendered.push_str(fraction);
    }
    let is_zero = int_part.chars().all(|ch| ch == '0') && fraction.is_empty();
    if value < 0.0 && !is_zero {
        rendered.insert(0, '-');
    }
    rendered
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// `$<number> <CODE>`, e.g. `$1.234.567 COP`.
pub fn format_currency_value(value: f64, locale: &LocaleConfig) -> String {
    format!(
        "${} {}",
        format_number(locale, value, locale.max_fraction_digits),
        locale.currency.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_colombian_pesos() {
        let locale = LocaleConfig::default();
        assert_eq!(format_currency_value(1_234_567.0, &locale), "$1.234.567 COP");
        assert_eq!(format_currency_value(0.0, &locale), "$0 COP");
        assert_eq!(format_currency_value(999.5, &locale), "$999,5 COP");
        assert_eq!(format_currency_value(-2500.25, &locale), "$-2.500,25 COP");
    }

    #[test]
    fn respects_locale_separators() {
        let locale = LocaleConfig::for_tag("en-US", CurrencyCode::new("usd"));
        assert_eq!(format_currency_value(1_234.5, &locale), "$1,234.5 USD");
        assert_eq!(format_number(&locale, 12.0, 0), "12");
    }

    #[test]
    fn rounding_away_the_fraction_keeps_the_integer() {
        let locale = LocaleConfig::default();
        assert_eq!(format_number(&locale, 364_100.000_000_1, 2), "364.100");
        assert_eq!(format_number(&locale, f64::NAN, 2), "0");
    }
}
