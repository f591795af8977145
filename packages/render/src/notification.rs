//! Per-incident notification messages.
//!
//! Each parsed report renders into two outbound forms: a one-line summary
//! capped for narrow broadcast channels, and a labeled multi-line narrative in
//! Slack mrkdwn. The narrative is a single template; only the occurrence line
//! differs between the single-instant and time-window variants.

use blotter_report_models::{IncidentRecord, Occurrence};

use crate::ap_style::format_datetime;

/// Hard length cap for the short summary, in characters.
const SUMMARY_LIMIT: usize = 140;
/// Characters kept ahead of the ellipsis when the cap is exceeded.
const SUMMARY_KEPT: usize = 138;

/// The two outbound message forms for one incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// One line; anything past [`SUMMARY_LIMIT`] characters is cut to
    /// [`SUMMARY_KEPT`] plus an ellipsis.
    pub summary: String,
    /// Labeled multi-line narrative.
    pub narrative: String,
}

/// Renders both notification forms for a record.
#[must_use]
pub fn render(record: &IncidentRecord) -> Notification {
    Notification {
        summary: short_summary(record),
        narrative: long_narrative(record),
    }
}

fn short_summary(record: &IncidentRecord) -> String {
    let line = format!(
        "{} reported on {} at {}.",
        record.code,
        format_datetime(record.report_time),
        record.location
    );
    if line.chars().count() > SUMMARY_LIMIT {
        let kept: String = line.chars().take(SUMMARY_KEPT).collect();
        format!("{kept}...")
    } else {
        line
    }
}

fn long_narrative(record: &IncidentRecord) -> String {
    let occurred = match record.occurred {
        Occurrence::At(at) => format!("*Occurred:* {}", format_datetime(at)),
        Occurrence::Between { start, end } => format!(
            "*Occurred between:* {} *and* {}",
            format_datetime(start),
            format_datetime(end)
        ),
    };
    format!(
        "*Case:* {}\n*Incident Code:* {}\n*Reported:* {}\n*Case status:* {}\n{}\n*Building:* {}\n*Location:* {}\n*Stolen:* {}\n*Damaged:* {}\n{}",
        record.case_number,
        record.code,
        format_datetime(record.report_time),
        record.status,
        occurred,
        record.building,
        record.location,
        format_usd(record.stolen),
        format_usd(record.damaged),
        record.description
    )
}

/// Formats a non-negative dollar amount with thousands separators and two
/// decimal places, e.g. `1234.5` → `"$1,234.50"`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample_record() -> IncidentRecord {
        IncidentRecord {
            case_number: "24-001234".to_string(),
            code: "BURGLARY".to_string(),
            report_time: dt(2024, 9, 3, 7, 30),
            status: "Open".to_string(),
            occurred: Occurrence::At(dt(2024, 9, 3, 0, 15)),
            building: "Smith Hall".to_string(),
            location: "890 N 17th St".to_string(),
            stolen: 250.5,
            damaged: 0.0,
            description: "Window pried open, laptop taken.".to_string(),
        }
    }

    #[test]
    fn summary_under_cap_passes_through() {
        let rendered = render(&sample_record());
        assert_eq!(
            rendered.summary,
            "BURGLARY reported on Sept. 3, 2024 at 7:30 a.m. at 890 N 17th St."
        );
    }

    #[test]
    fn summary_over_cap_truncates_to_141_chars() {
        let mut record = sample_record();
        record.location = "Parking Garage 14, Level 3, northeast stairwell adjacent to \
                           the loading dock behind the Continuing Education Center annex"
            .to_string();
        let summary = render(&record).summary;
        assert_eq!(summary.chars().count(), SUMMARY_KEPT + 3);
        assert!(summary.ends_with("..."));
        assert!(summary.starts_with("BURGLARY reported on"));
    }

    #[test]
    fn narrative_single_instant() {
        let rendered = render(&sample_record());
        assert_eq!(
            rendered.narrative,
            "*Case:* 24-001234\n\
             *Incident Code:* BURGLARY\n\
             *Reported:* Sept. 3, 2024 at 7:30 a.m.\n\
             *Case status:* Open\n\
             *Occurred:* Sept. 3, 2024 at 12:15 a.m.\n\
             *Building:* Smith Hall\n\
             *Location:* 890 N 17th St\n\
             *Stolen:* $250.50\n\
             *Damaged:* $0.00\n\
             Window pried open, laptop taken."
        );
    }

    #[test]
    fn narrative_window_changes_only_the_occurrence_line() {
        let single = render(&sample_record()).narrative;

        let mut record = sample_record();
        record.occurred = Occurrence::Between {
            start: dt(2024, 9, 2, 22, 0),
            end: dt(2024, 9, 3, 6, 45),
        };
        let window = render(&record).narrative;

        let single_lines: Vec<&str> = single.lines().collect();
        let window_lines: Vec<&str> = window.lines().collect();
        assert_eq!(single_lines.len(), window_lines.len());
        for (i, (a, b)) in single_lines.iter().zip(&window_lines).enumerate() {
            if i == 4 {
                assert_eq!(
                    *b,
                    "*Occurred between:* Sept. 2, 2024 at 10:00 p.m. \
                     *and* Sept. 3, 2024 at 6:45 a.m."
                );
            } else {
                assert_eq!(a, b, "line {i} should not differ between variants");
            }
        }
    }

    #[test]
    fn usd_formatting_groups_thousands() {
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(75.0), "$75.00");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(999.999), "$1,000.00");
    }
}
