//! Occurrence-window resolution for the `occurred` field.
//!
//! The field holds either one labeled date (`Date: 09/03/2024 00:15`) or a
//! window written as two dates at fixed character offsets of the field's
//! combined text. The count of `<span>` sub-elements decides which layout is
//! present; any other count is structural drift, not a partial record.

use std::ops::Range;

use blotter_report_models::Occurrence;
use scraper::{ElementRef, Selector};

use crate::{ExtractError, parsing};

/// Label prefix of the single-instant layout.
const SINGLE_DATE_LABEL: &str = "Date:";

/// Offsets of the two timestamps inside the window layout's combined text.
const WINDOW_FIRST: Range<usize> = 10..26;
const WINDOW_SECOND_FROM: usize = 31;

/// Resolves the occurred field of the incident at `position`.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedShape`] when the field holds neither
/// one nor two date spans, [`ExtractError::MalformedValue`] when the text at
/// the expected place does not parse as a timestamp.
pub fn resolve(element: ElementRef<'_>, position: usize) -> Result<Occurrence, ExtractError> {
    let span = Selector::parse("span").unwrap_or_else(|_| unreachable!());
    let count = element.select(&span).count();
    let text: String = element.text().collect();
    match count {
        1 => single(&text, position),
        2 => window(&text, position),
        count => Err(ExtractError::UnsupportedShape { position, count }),
    }
}

fn single(text: &str, position: usize) -> Result<Occurrence, ExtractError> {
    text.trim()
        .strip_prefix(SINGLE_DATE_LABEL)
        .and_then(parsing::parse_report_time)
        .map(Occurrence::At)
        .ok_or_else(|| malformed(position, text))
}

fn window(text: &str, position: usize) -> Result<Occurrence, ExtractError> {
    let first = text
        .get(WINDOW_FIRST)
        .and_then(parsing::parse_report_time)
        .ok_or_else(|| malformed(position, text))?;
    let second = text
        .get(WINDOW_SECOND_FROM..)
        .and_then(parsing::parse_report_time)
        .ok_or_else(|| malformed(position, text))?;
    Ok(Occurrence::Between {
        start: first,
        end: second,
    })
}

fn malformed(position: usize, text: &str) -> ExtractError {
    ExtractError::MalformedValue {
        position,
        attribute: "occurred",
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use scraper::Html;

    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn resolve_fragment(inner: &str) -> Result<Occurrence, ExtractError> {
        let doc = Html::parse_fragment(&format!("<label>{inner}</label>"));
        let label = Selector::parse("label").unwrap();
        let element = doc.select(&label).next().unwrap();
        resolve(element, 0)
    }

    #[test]
    fn one_span_parses_the_single_instant() {
        let occurred = resolve_fragment("<span> Date: 09/03/2024 00:15</span>").unwrap();
        assert_eq!(occurred, Occurrence::At(dt(2024, 9, 3, 0, 15)));
    }

    #[test]
    fn two_spans_parse_the_window_at_fixed_offsets() {
        let occurred = resolve_fragment(
            " Between: <span>09/02/2024 22:00</span> and <span>09/03/2024 06:45</span>",
        )
        .unwrap();
        assert_eq!(
            occurred,
            Occurrence::Between {
                start: dt(2024, 9, 2, 22, 0),
                end: dt(2024, 9, 3, 6, 45),
            }
        );
    }

    #[test]
    fn window_tolerates_trailing_whitespace() {
        let occurred = resolve_fragment(
            " Between: <span>09/02/2024 22:00</span> and <span>09/03/2024 06:45  </span>",
        )
        .unwrap();
        assert_eq!(
            occurred,
            Occurrence::Between {
                start: dt(2024, 9, 2, 22, 0),
                end: dt(2024, 9, 3, 6, 45),
            }
        );
    }

    #[test]
    fn zero_spans_is_unsupported() {
        let err = resolve_fragment("09/03/2024 00:15").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnsupportedShape { position: 0, count: 0 }
        ));
    }

    #[test]
    fn three_spans_is_unsupported() {
        let err = resolve_fragment(
            "<span>09/01/2024 08:00</span><span>09/02/2024 08:00</span><span>09/03/2024 08:00</span>",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnsupportedShape { position: 0, count: 3 }
        ));
    }

    #[test]
    fn single_span_without_the_date_label_is_malformed() {
        let err = resolve_fragment("<span>09/03/2024 00:15</span>").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedValue {
                attribute: "occurred",
                ..
            }
        ));
    }

    #[test]
    fn truncated_window_text_is_malformed() {
        let err = resolve_fragment(" Between: <span>09/02/2024 22:00</span><span></span>")
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedValue {
                attribute: "occurred",
                ..
            }
        ));
    }
}
