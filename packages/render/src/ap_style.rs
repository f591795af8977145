//! AP-style narrative date and time formatting.
//!
//! Follows the newsroom convention the campus paper uses: month names
//! abbreviated with a trailing period except March through July (spelled out),
//! September irregularly shortened to "Sept.", day-of-month without a leading
//! zero, and a 12-hour clock with "a.m."/"p.m." suffixes.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Formats a timestamp as `"<date> at <time>"`,
/// e.g. `"Sept. 3, 2024 at 12:15 a.m."`.
#[must_use]
pub fn format_datetime(ts: NaiveDateTime) -> String {
    format!("{} at {}", format_date(ts), format_time(ts))
}

/// AP month name: spelled out for March through July, abbreviated with a
/// period otherwise.
const fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan.",
        2 => "Feb.",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "Aug.",
        9 => "Sept.",
        10 => "Oct.",
        11 => "Nov.",
        12 => "Dec.",
        _ => unreachable!(),
    }
}

fn format_date(ts: NaiveDateTime) -> String {
    format!("{} {}, {}", month_name(ts.month()), ts.day(), ts.year())
}

fn format_time(ts: NaiveDateTime) -> String {
    let minute = ts.minute();
    let (hour, suffix) = match ts.hour() {
        0 => (12, "a.m."),
        hour @ 1..=11 => (hour, "a.m."),
        12 => (12, "p.m."),
        hour => (hour - 12, "p.m."),
    };
    format!("{hour}:{minute:02} {suffix}")
}
