//! Text-cleaning helpers for raw report field values.

use chrono::NaiveDateTime;

/// Timestamp layout used throughout the report page.
pub const REPORT_TIME_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Parses a `09/03/2024 00:15`-style timestamp, tolerating surrounding
/// whitespace.
#[must_use]
pub fn parse_report_time(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), REPORT_TIME_FORMAT).ok()
}

/// Parses a `$1,234.50`-style currency amount into dollars.
///
/// Strips the leading currency symbol and thousands separators. Returns
/// `None` when the remainder does not parse, or parses to a negative or
/// non-finite number.
#[must_use]
pub fn parse_currency(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let amount: f64 = digits.replace(',', "").parse().ok()?;
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parses_page_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 9, 3)
            .unwrap()
            .and_hms_opt(0, 15, 0)
            .unwrap();
        assert_eq!(parse_report_time("09/03/2024 00:15"), Some(expected));
        assert_eq!(parse_report_time("  09/03/2024 00:15  "), Some(expected));
    }

    #[test]
    fn rejects_other_timestamp_layouts() {
        assert_eq!(parse_report_time("2024-09-03 00:15"), None);
        assert_eq!(parse_report_time("09/03/2024"), None);
        assert_eq!(parse_report_time(""), None);
    }

    #[test]
    fn parses_currency_with_separators() {
        assert_eq!(parse_currency("$1,234.50"), Some(1234.50));
        assert_eq!(parse_currency("$0.00"), Some(0.0));
        assert_eq!(parse_currency("$75"), Some(75.0));
        assert_eq!(parse_currency("250.50"), Some(250.50));
    }

    #[test]
    fn rejects_negative_and_unparseable_amounts() {
        assert_eq!(parse_currency("$-20.00"), None);
        assert_eq!(parse_currency("-$20.00"), None);
        assert_eq!(parse_currency("none"), None);
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("$"), None);
    }
}
